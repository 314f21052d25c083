use super::*;
use crate::scene::compiler::compile_scene;

fn layers(spec: SceneSpec, t: f64) -> LayerStack {
    let clip = SceneClip::new(spec, Canvas::new(640, 360).unwrap(), 30, 6.0).unwrap();
    let mut stack = LayerStack::new();
    push_scene_layers(&clip, t, &mut stack).unwrap();
    stack
}

#[test]
fn sunrise_palette_moves_from_dawn_to_day() {
    assert_eq!(
        sky_palette(Theme::Sunrise, 0.0),
        (Rgb8::new(15, 25, 55), Rgb8::new(40, 20, 60))
    );
    assert_eq!(
        sky_palette(Theme::Sunrise, 1.0),
        (Rgb8::new(90, 170, 255), Rgb8::new(255, 175, 120))
    );
    assert_eq!(sky_palette(Theme::City, 0.3), sky_palette(Theme::Day, 0.9));
}

#[test]
fn clip_progress_is_clamped() {
    assert_eq!(clip_progress(3.0, 6.0), 0.5);
    assert_eq!(clip_progress(-1.0, 6.0), 0.0);
    assert_eq!(clip_progress(9.0, 6.0), 1.0);
}

#[test]
fn particle_positions_wrap_and_depend_only_on_t() {
    assert_eq!(particle_pos(100, 240.0, 0.0, 640), 100.0);
    assert_eq!(particle_pos(600, 240.0, 1.0, 640), 200.0);
    assert_eq!(particle_pos(5, 60.0, 0.99, 640), 64.0);
    assert_eq!(particle_pos(5, 520.0, 2.5, 360), particle_pos(5, 520.0, 2.5, 360));
}

#[test]
fn default_day_has_sun_clouds_and_ground() {
    // sun halo + disc, two clouds, one hill
    assert_eq!(layers(SceneSpec::default(), 0.0).len(), 5);
}

#[test]
fn clear_night_has_moon_and_ground_only() {
    assert_eq!(layers(compile_scene("clear night"), 1.0).len(), 3);
}

#[test]
fn rainy_scene_adds_third_cloud_and_particles() {
    // three clouds, hill, rain
    assert_eq!(layers(compile_scene("rain"), 0.0).len(), 5);
}

#[test]
fn themed_props_are_layered() {
    // sun 2, clouds 2, two hills, trees, birds 2
    assert_eq!(layers(compile_scene("forest"), 0.0).len(), 9);
    // sun 2, clouds 2, sand, ocean, waves, birds 2
    assert_eq!(layers(compile_scene("beach"), 0.0).len(), 9);
    // sun 2, clouds 2, hill, skyline
    assert_eq!(layers(compile_scene("city"), 0.0).len(), 6);
}

#[test]
fn weather_particles_are_reproducible() {
    let a = layers(compile_scene("snow"), 2.5);
    let b = layers(compile_scene("snow"), 2.5);
    assert_eq!(a, b);
}
