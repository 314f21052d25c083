use std::collections::HashMap;

use super::*;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn empty_environment_gives_defaults() {
    let cfg = RenderConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg, RenderConfig::default());
    assert_eq!(cfg.ffmpeg_bin, PathBuf::from("ffmpeg"));
    assert!(!cfg.threading.parallel);
}

#[test]
fn variables_override_defaults() {
    let cfg = RenderConfig::from_lookup(lookup(&[
        (ENV_FONT, "/fonts/Inter.ttf"),
        (ENV_FFMPEG, "/opt/ffmpeg/bin/ffmpeg"),
        (ENV_THREADS, "4"),
        (ENV_FADE, "tint"),
    ]))
    .unwrap();
    assert_eq!(cfg.font_path, Some(PathBuf::from("/fonts/Inter.ttf")));
    assert_eq!(cfg.ffmpeg_bin, PathBuf::from("/opt/ffmpeg/bin/ffmpeg"));
    assert_eq!(
        cfg.threading,
        RenderThreading {
            parallel: true,
            threads: Some(4)
        }
    );
    assert_eq!(cfg.fade_style, FadeStyle::TintTowardBlack);
    assert_eq!(cfg.font_candidates()[0], PathBuf::from("/fonts/Inter.ttf"));
    assert_eq!(cfg.sequencer_opts().threading, cfg.threading);
}

#[test]
fn blank_values_are_ignored() {
    let cfg = RenderConfig::from_lookup(lookup(&[(ENV_FONT, "  "), (ENV_FADE, "")])).unwrap();
    assert_eq!(cfg.font_path, None);
    assert_eq!(cfg.fade_style, FadeStyle::Alpha);
}

#[test]
fn bad_values_are_rejected() {
    assert!(RenderConfig::from_lookup(lookup(&[(ENV_THREADS, "many")])).is_err());
    assert!(RenderConfig::from_lookup(lookup(&[(ENV_THREADS, "0")])).is_err());
    assert!(RenderConfig::from_lookup(lookup(&[(ENV_FADE, "sparkle")])).is_err());
}

#[test]
fn one_thread_means_sequential() {
    let cfg = RenderConfig::default().with_threads(1).unwrap();
    assert_eq!(cfg.threading, RenderThreading::default());
}
