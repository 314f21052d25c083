use super::*;

#[test]
fn gradient_rows_interpolate_top_to_bottom() {
    let canvas = Canvas::new(4, 3).unwrap();
    let s = vertical_gradient(canvas, Rgb8::new(0, 0, 0), Rgb8::new(200, 100, 50)).unwrap();
    assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(s.pixel(3, 1), Some([100, 50, 25, 255]));
    assert_eq!(s.pixel(2, 2), Some([200, 100, 50, 255]));
}

#[test]
fn single_row_gradient_uses_top() {
    let canvas = Canvas::new(2, 1).unwrap();
    let s = vertical_gradient(canvas, Rgb8::new(9, 9, 9), Rgb8::WHITE).unwrap();
    assert_eq!(s.pixel(1, 0), Some([9, 9, 9, 255]));
}

#[test]
fn ring_vignette_darkens_corners_more_than_center() {
    let canvas = Canvas::new(160, 90).unwrap();
    let v = Vignette::rings(canvas, 0.7, 0.35).unwrap();
    let center = v.keep_at(80, 45).unwrap();
    let corner = v.keep_at(0, 0).unwrap();
    assert!(corner < center, "corner {corner} center {center}");
    assert!(center >= 245);
    assert!(corner >= 255 - 90);
}

#[test]
fn disc_vignette_is_gentle_inside_the_disc() {
    let canvas = Canvas::new(160, 90).unwrap();
    let v = Vignette::disc(canvas, 0.18).unwrap();
    assert_eq!(v.keep_at(80, 45), Some(255));
    assert!(v.keep_at(0, 0).unwrap() >= 255 - 46);
}

#[test]
fn apply_scales_color_but_not_alpha() {
    let canvas = Canvas::new(32, 32).unwrap();
    let v = Vignette::rings(canvas, 0.7, 0.35).unwrap();
    let mut s = Surface::filled(32, 32, [200, 200, 200, 255]).unwrap();
    v.apply(&mut s);
    let corner = s.pixel(0, 0).unwrap();
    assert!(corner[0] < 200);
    assert_eq!(corner[3], 255);
}
