use super::*;
use crate::{
    animation::ease::Ease,
    foundation::core::Point,
    plan::compiler::compile_prompt,
    render::{layers::Layer, text::BuiltinFont},
};

fn layers_at(plan: &AnimationPlan, t: f64, fade: FadeStyle) -> LayerStack {
    let mut stack = LayerStack::new();
    push_plan_layers(plan, t, &BuiltinFont, fade, &mut stack).unwrap();
    stack
}

fn text_plan(reveal: RevealKind) -> AnimationPlan {
    AnimationPlan::builder(Canvas::new(320, 180).unwrap(), 30, 4.0)
        .subtitle(TextLayer {
            text: "abcdefghij".to_string(),
            font_size: 10.0,
            position: Point::new(40.0, 50.0),
            color: Rgb8::WHITE,
            reveal,
            start: 1.0,
            duration: 1.0,
        })
        .build()
        .unwrap()
}

#[test]
fn nothing_is_visible_before_any_start() {
    let plan = compile_prompt("Hello\nworld");
    assert!(layers_at(&plan, 0.0, FadeStyle::Alpha).is_empty());
    assert!(layers_at(&plan, 0.18, FadeStyle::Alpha).is_empty());
}

#[test]
fn fully_revealed_plan_pushes_every_element() {
    let plan = compile_prompt("Hello\nworld");
    // 3 shapes + title + underline + 1 subtitle, two layers each.
    assert_eq!(layers_at(&plan, 4.9, FadeStyle::Alpha).len(), 12);
}

#[test]
fn typewriter_reveals_a_prefix_of_at_least_one_char() {
    let plan = text_plan(RevealKind::Typewriter);
    let early = layers_at(&plan, 1.01, FadeStyle::Alpha);
    let fill: Vec<&Layer> = early.iter().collect();
    // One char of the builtin face at scale 1 is 6 px wide.
    assert_eq!(fill[1].sprite.width(), 6);
    assert_eq!(fill[1].opacity, 1.0);

    let half = layers_at(&plan, 1.5, FadeStyle::Alpha);
    assert_eq!(half.iter().nth(1).unwrap().sprite.width(), 30);
}

#[test]
fn fade_uses_alpha_or_tint() {
    let plan = text_plan(RevealKind::Fade);

    let alpha = layers_at(&plan, 1.5, FadeStyle::Alpha);
    let fill = alpha.iter().nth(1).unwrap();
    assert!((fill.opacity - 127.0 / 255.0).abs() < 1e-6);

    let tint = layers_at(&plan, 1.5, FadeStyle::TintTowardBlack);
    let fill = tint.iter().nth(1).unwrap();
    assert_eq!(fill.opacity, 1.0);
    let lit = fill
        .sprite
        .data()
        .chunks_exact(4)
        .find(|px| px[3] == 255)
        .unwrap();
    assert!((126..=127).contains(&lit[0]));
}

#[test]
fn slide_left_starts_offset_and_settles() {
    let plan = text_plan(RevealKind::SlideLeft);
    let x_at = |t: f64| layers_at(&plan, t, FadeStyle::Alpha).iter().nth(1).unwrap().x;
    assert_eq!(x_at(3.0), 40);
    assert!(x_at(1.2) < 40);
}

#[test]
fn subtitles_are_clamped_to_the_safe_margin() {
    let plan = AnimationPlan::builder(Canvas::new(320, 180).unwrap(), 30, 4.0)
        .subtitle(TextLayer {
            position: Point::new(0.0, 50.0),
            ..text_plan(RevealKind::Fade).subtitles()[0].clone()
        })
        .build()
        .unwrap();
    let stack = layers_at(&plan, 3.0, FadeStyle::Alpha);
    // 8% of 320.
    assert_eq!(stack.iter().nth(1).unwrap().x, 25);
}

#[test]
fn grow_w_shape_is_absent_then_grows() {
    let plan = AnimationPlan::builder(Canvas::new(320, 180).unwrap(), 30, 4.0)
        .shape(ShapeLayer {
            kind: ShapeKind::Rect,
            bounds: Rect::from_origin_size((20.0, 100.0), (200.0, 12.0)),
            color: Rgb8::new(90, 170, 255),
            start: 1.0,
            duration: 1.0,
            anim: ShapeAnim::GrowW,
            ease: Ease::Linear,
        })
        .build()
        .unwrap();
    assert!(layers_at(&plan, 1.0, FadeStyle::Alpha).is_empty());
    let done = layers_at(&plan, 2.5, FadeStyle::Alpha);
    let solid = done.iter().nth(1).unwrap();
    assert!(solid.sprite.width() >= 200);
}

#[test]
fn fade_style_parses_config_names() {
    assert_eq!("alpha".parse::<FadeStyle>().unwrap(), FadeStyle::Alpha);
    assert_eq!(" Tint ".parse::<FadeStyle>().unwrap(), FadeStyle::TintTowardBlack);
    assert!("sepia".parse::<FadeStyle>().is_err());
}
