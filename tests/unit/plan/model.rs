use super::*;
use crate::animation::ease::Ease;

fn title() -> TextLayer {
    TextLayer {
        text: "Hello".to_string(),
        font_size: 74.0,
        position: Point::new(120.0, 160.0),
        color: Rgb8::new(245, 248, 255),
        reveal: RevealKind::SlideLeft,
        start: 0.18,
        duration: 1.05,
    }
}

fn bar() -> ShapeLayer {
    ShapeLayer {
        kind: ShapeKind::Rect,
        bounds: Rect::from_origin_size((140.0, 520.0), (1000.0, 18.0)),
        color: Rgb8::new(90, 170, 255),
        start: 0.75,
        duration: 1.35,
        anim: ShapeAnim::GrowW,
        ease: Ease::InOutCubic,
    }
}

#[test]
fn builder_produces_plan_with_layers_in_order() {
    let plan = AnimationPlan::builder(Canvas::default(), 30, 5.0)
        .background(Rgb8::new(12, 12, 20))
        .title(title())
        .subtitle(TextLayer {
            text: "one".to_string(),
            ..title()
        })
        .subtitle(TextLayer {
            text: "two".to_string(),
            ..title()
        })
        .shape(bar())
        .build()
        .unwrap();

    assert_eq!(plan.fps(), 30);
    assert_eq!(plan.duration(), 5.0);
    assert_eq!(plan.background(), Rgb8::new(12, 12, 20));
    assert_eq!(plan.title().unwrap().text, "Hello");
    let subs: Vec<&str> = plan.subtitles().iter().map(|l| l.text.as_str()).collect();
    assert_eq!(subs, vec!["one", "two"]);
    assert_eq!(plan.shapes().len(), 1);
}

#[test]
fn builder_rejects_zero_fps_and_bad_duration() {
    assert!(AnimationPlan::builder(Canvas::default(), 0, 5.0).build().is_err());
    assert!(AnimationPlan::builder(Canvas::default(), 30, 0.0).build().is_err());
    assert!(
        AnimationPlan::builder(Canvas::default(), 30, f64::NAN)
            .build()
            .is_err()
    );
}

#[test]
fn builder_rejects_invalid_layers() {
    let bad_text = TextLayer {
        duration: 0.0,
        ..title()
    };
    assert!(
        AnimationPlan::builder(Canvas::default(), 30, 5.0)
            .title(bad_text)
            .build()
            .is_err()
    );

    let bad_size = TextLayer {
        font_size: -1.0,
        ..title()
    };
    assert!(
        AnimationPlan::builder(Canvas::default(), 30, 5.0)
            .subtitle(bad_size)
            .build()
            .is_err()
    );

    let bad_shape = ShapeLayer {
        duration: -2.0,
        ..bar()
    };
    assert!(
        AnimationPlan::builder(Canvas::default(), 30, 5.0)
            .shape(bad_shape)
            .build()
            .is_err()
    );
}

#[test]
fn serde_roundtrip_preserves_plan() {
    let plan = AnimationPlan::builder(Canvas::default(), 30, 5.0)
        .title(title())
        .shape(bar())
        .build()
        .unwrap();
    let s = serde_json::to_string(&plan).unwrap();
    let back: AnimationPlan = serde_json::from_str(&s).unwrap();
    assert_eq!(plan, back);
}

#[test]
fn deserialize_runs_validation() {
    let json = r#"{
        "canvas": {"width": 64, "height": 64},
        "fps": 0,
        "duration": 2.0,
        "background": {"r": 0, "g": 0, "b": 0}
    }"#;
    let err = serde_json::from_str::<AnimationPlan>(json).unwrap_err();
    assert!(err.to_string().contains("fps"));
}

#[test]
fn enum_names_are_snake_case() {
    assert_eq!(
        serde_json::to_string(&RevealKind::SlideLeft).unwrap(),
        "\"slide_left\""
    );
    assert_eq!(
        serde_json::to_string(&ShapeAnim::GrowW).unwrap(),
        "\"grow_w\""
    );
    assert_eq!(
        serde_json::to_string(&ShapeKind::Circle).unwrap(),
        "\"circle\""
    );
}

#[test]
fn font_size_has_an_upper_bound() {
    for size in [5.0e10, 2.0e5, MAX_FONT_PX + 1.0, f32::INFINITY] {
        let layer = TextLayer {
            font_size: size,
            ..title()
        };
        assert!(layer.validate().is_err(), "{size}");
        assert!(
            AnimationPlan::builder(Canvas::new(320, 180).unwrap(), 30, 5.0)
                .subtitle(layer)
                .build()
                .is_err()
        );
    }
    let largest = TextLayer {
        font_size: MAX_FONT_PX,
        ..title()
    };
    assert!(largest.validate().is_ok());
}

#[test]
fn from_json_reports_serialization_errors() {
    let plan = AnimationPlan::builder(Canvas::new(320, 180).unwrap(), 24, 3.0)
        .title(title())
        .build()
        .unwrap();
    let json = serde_json::to_string(&plan).unwrap();
    assert_eq!(AnimationPlan::from_json(&json).unwrap(), plan);

    let err = AnimationPlan::from_json(r#"{"canvas":{"width":320,"height":180},"fps":0,"duration":1.0}"#)
        .unwrap_err();
    assert!(matches!(err, MotionError::Serde(_)));
    assert!(matches!(AnimationPlan::from_json("not json"), Err(MotionError::Serde(_))));
}
