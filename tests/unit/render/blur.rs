use super::*;

fn dot(w: u32, h: u32, x: u32, y: u32) -> Surface {
    let mut s = Surface::new(w, h).unwrap();
    let i = ((y * w + x) * 4) as usize;
    s.data_mut()[i..i + 4].copy_from_slice(&[255, 255, 255, 255]);
    s
}

#[test]
fn kernel_weights_sum_to_one_and_are_symmetric() {
    for radius in [1, 2, 6, 20] {
        let k = BlurKernel::for_radius(radius);
        assert_eq!(k.radius(), radius as usize);
        assert_eq!(k.weights().iter().sum::<u32>(), 1 << 16);
        let w = k.weights();
        assert!((0..w.len() / 2).all(|i| w[i] == w[w.len() - 1 - i]));
    }
    assert_eq!(BlurKernel::for_radius(0).weights(), &[1 << 16]);
}

#[test]
fn radius_0_is_identity() {
    let s = dot(3, 2, 1, 1);
    assert_eq!(blur(&s, 0).unwrap(), s);
}

#[test]
fn flat_surface_is_unchanged() {
    let s = Surface::filled(5, 4, [10, 20, 30, 40]).unwrap();
    assert_eq!(blur(&s, 3).unwrap(), s);
}

#[test]
fn single_pixel_spreads_but_keeps_energy() {
    let s = dot(9, 9, 4, 4);
    let out = blur(&s, 2).unwrap();

    assert!(out.data().chunks_exact(4).filter(|px| px[3] != 0).count() > 1);
    let sum_a: u32 = out.data().chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 6);
    assert!(out.pixel(4, 4).unwrap()[3] < 255);
    assert_eq!(out.pixel(3, 4), out.pixel(5, 4));
    assert_eq!(out.pixel(4, 3), out.pixel(4, 5));
}

#[test]
fn radius_wider_than_the_surface_clamps_at_edges() {
    let s = dot(2, 1, 0, 0);
    let out = blur(&s, 8).unwrap();
    assert_eq!((out.width(), out.height()), (2, 1));
    assert!(out.pixel(1, 0).unwrap()[3] > 0);
}
