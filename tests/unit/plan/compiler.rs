use super::*;

#[test]
fn empty_prompt_uses_defaults() {
    let plan = compile_prompt("   \n  ");
    assert_eq!(plan.title().unwrap().text, DEFAULT_TITLE);
    assert_eq!(plan.subtitles().len(), 1);
    assert_eq!(plan.subtitles()[0].text, DEFAULT_SUBTITLE);
    assert_eq!(plan.duration(), 5.0);
    assert_eq!(plan.fps(), 30);
    assert_eq!(plan.canvas(), Canvas::new(1280, 720).unwrap());
}

#[test]
fn title_is_first_line_truncated_to_70_chars() {
    let long = "x".repeat(100);
    let plan = compile_prompt(&format!("  {long}\nrest"));
    assert_eq!(plan.title().unwrap().text.chars().count(), 70);
    assert_eq!(plan.subtitles()[0].text, "rest");
}

#[test]
fn subtitles_are_capped_at_three_lines() {
    let words = "lorem ipsum dolor sit amet ".repeat(20);
    let plan = compile_prompt(&format!("Title\n{words}"));
    assert_eq!(plan.subtitles().len(), 3);
    for line in plan.subtitles() {
        assert!(line.text.chars().count() <= 46);
    }
    assert!((plan.duration() - 5.6).abs() < 1e-9);
}

#[test]
fn reference_layout_coordinates() {
    let plan = compile_prompt("Hello\none two");
    let title = plan.title().unwrap();
    assert_eq!(title.position, Point::new(120.0, 160.0));
    assert_eq!(title.font_size, 74.0);
    assert_eq!(title.reveal, RevealKind::SlideLeft);
    assert_eq!(plan.background(), Rgb8::new(12, 12, 20));

    let sub = &plan.subtitles()[0];
    assert_eq!(sub.position, Point::new(120.0, 320.0));
    assert_eq!(sub.reveal, RevealKind::Typewriter);
    assert_eq!(sub.start, 1.25);

    let shapes = plan.shapes();
    assert_eq!(shapes.len(), 3);
    assert_eq!(shapes[0].kind, ShapeKind::Circle);
    assert_eq!(
        shapes[1].bounds,
        Rect::from_origin_size((140.0, 520.0), (1000.0, 18.0))
    );
    assert_eq!(shapes[2].color, Rgb8::new(70, 120, 200));
}

#[test]
fn custom_canvas_scales_layout() {
    let compiler = PromptCompiler::new(Canvas::new(640, 360).unwrap(), 24);
    let plan = compiler.compile("Hi");
    assert_eq!(plan.fps(), 24);
    assert_eq!(plan.title().unwrap().position, Point::new(60.0, 80.0));
    assert_eq!(plan.title().unwrap().font_size, 37.0);
}

#[test]
fn wrap_is_greedy_and_collapses_whitespace() {
    assert_eq!(
        wrap("aa  bb\tcc   dd", 5),
        vec!["aa bb".to_string(), "cc dd".to_string()]
    );
    assert!(wrap("   ", 10).is_empty());
}

#[test]
fn wrap_breaks_long_words() {
    let lines = wrap("abcdefghijklmnopqrstuvwxy", 10);
    assert_eq!(lines, vec!["abcdefghij", "klmnopqrst", "uvwxy"]);

    let lines = wrap("ab cdefghijklmn", 6);
    assert_eq!(lines, vec!["ab cde", "fghijk", "lmn"]);
}
