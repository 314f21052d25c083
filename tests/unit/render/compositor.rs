use super::*;
use crate::{
    plan::compiler::PromptCompiler,
    render::{environment::push_scene_layers, text::BuiltinFont},
    scene::{compiler::compile_scene, spec::SceneSpec},
};

fn small() -> Canvas {
    Canvas::new(320, 180).unwrap()
}

fn plan_compositor(prompt: &str) -> FrameCompositor {
    let plan = PromptCompiler::new(small(), 30).compile(prompt);
    FrameCompositor::new(Composition::Plan(plan), Arc::new(BuiltinFont)).unwrap()
}

fn scene_clip(prompt: &str) -> SceneClip {
    SceneClip::new(compile_scene(prompt), small(), 30, 5.0).unwrap()
}

#[test]
fn compositor_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FrameCompositor>();
}

#[test]
fn frames_are_opaque_and_canvas_sized() {
    let comp = plan_compositor("Launch day\nShip it");
    let frame = comp.render_frame(2.0).unwrap();
    assert_eq!((frame.width, frame.height), (320, 180));
    assert_eq!(frame.data.len(), 320 * 180 * 4);
    assert!(frame.premultiplied);
    assert!(frame.data.chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn frame_before_any_start_is_just_the_backdrop() {
    let comp = plan_compositor("Launch day\nShip it");
    assert!(comp.layers_at(0.0).unwrap().is_empty());
    let frame = comp.render_frame(0.0).unwrap();
    assert_eq!(frame.data, comp.backdrop(0.0).unwrap().into_data());
}

#[test]
fn rendering_is_deterministic() {
    let comp = plan_compositor("Launch day\nShip it");
    assert_eq!(comp.render_frame(1.3).unwrap(), comp.render_frame(1.3).unwrap());

    let scene = FrameCompositor::new(
        Composition::Scene(scene_clip("snowy forest")),
        Arc::new(BuiltinFont),
    )
    .unwrap();
    assert_eq!(scene.render_frame(2.5).unwrap(), scene.render_frame(2.5).unwrap());
}

#[test]
fn plan_backdrop_darkens_toward_the_bottom() {
    let comp = plan_compositor("Hello");
    let bg = comp.backdrop(0.0).unwrap();
    let top = bg.pixel(160, 90 - 60).unwrap();
    let bottom = bg.pixel(160, 90 + 60).unwrap();
    assert!(bottom[2] < top[2]);
}

#[test]
fn layered_stacks_scene_under_plan() {
    let clip = scene_clip("city at night");
    let plan = PromptCompiler::new(small(), 30).compile("Night shift");
    assert_eq!(plan.duration(), clip.duration());

    let layered = FrameCompositor::new(
        Composition::layered(clip.clone(), plan.clone()).unwrap(),
        Arc::new(BuiltinFont),
    )
    .unwrap();
    let t = 3.0;

    let mut scene_only = LayerStack::new();
    push_scene_layers(&clip, t, &mut scene_only).unwrap();
    let plan_only = FrameCompositor::new(Composition::Plan(plan), Arc::new(BuiltinFont))
        .unwrap()
        .layers_at(t)
        .unwrap();

    let stack = layered.layers_at(t).unwrap();
    assert_eq!(stack.len(), scene_only.len() + plan_only.len());
    assert!(!plan_only.is_empty());
}

#[test]
fn mismatched_layered_composition_is_rejected() {
    let clip = scene_clip("beach");
    let plan = PromptCompiler::new(Canvas::new(640, 360).unwrap(), 30).compile("Surf");
    assert!(Composition::layered(clip, plan).is_err());
}

#[test]
fn non_finite_time_is_rejected() {
    let comp = plan_compositor("Hello");
    assert!(comp.render_frame(f64::NAN).is_err());
    assert!(comp.layers_at(f64::INFINITY).is_err());
}

#[test]
fn fade_style_is_configurable() {
    let comp = plan_compositor("Hello");
    assert_eq!(comp.fade_style(), FadeStyle::Alpha);
    let comp = comp.with_fade_style(FadeStyle::TintTowardBlack);
    assert_eq!(comp.fade_style(), FadeStyle::TintTowardBlack);
    assert_eq!(comp.fonts().family(), "builtin-5x7");
}

#[test]
fn default_scene_is_valid_for_a_compositor() {
    let clip = SceneClip::new(SceneSpec::default(), small(), 30, 1.0).unwrap();
    let comp = FrameCompositor::new(Composition::Scene(clip), Arc::new(BuiltinFont)).unwrap();
    assert_eq!(comp.canvas(), small());
    assert!(!comp.layers_at(0.5).unwrap().is_empty());
}
