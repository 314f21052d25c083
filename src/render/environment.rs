//! Procedural scene elements: sky, celestial bodies, clouds, ground, props and weather.

use kurbo::{Arc, Circle, Ellipse, Line, Point, RoundedRect, Vec2};

use crate::{
    foundation::{
        core::{Canvas, Rect, Rgb8},
        error::MotionResult,
        math::{Rng64, clamp01, lerp},
    },
    render::{
        draw::{push_painted, push_union},
        layers::LayerStack,
    },
    scene::spec::{SceneClip, SceneSpec, Theme, Weather},
};

const HORIZON: f64 = 0.70;

/// Sky gradient stops for `theme` at normalized clip progress `p`.
pub fn sky_palette(theme: Theme, p: f64) -> (Rgb8, Rgb8) {
    match theme {
        Theme::Sunrise => (
            Rgb8::new(15, 25, 55).lerp(Rgb8::new(90, 170, 255), p),
            Rgb8::new(40, 20, 60).lerp(Rgb8::new(255, 175, 120), p),
        ),
        Theme::Night => (Rgb8::new(10, 16, 40), Rgb8::new(30, 40, 70)),
        Theme::Rainy => (Rgb8::new(70, 90, 120), Rgb8::new(120, 140, 170)),
        Theme::Snowy => (Rgb8::new(150, 190, 235), Rgb8::new(230, 245, 255)),
        Theme::Beach => (Rgb8::new(90, 180, 255), Rgb8::new(255, 210, 170)),
        Theme::Day | Theme::Forest | Theme::City => {
            (Rgb8::new(85, 170, 255), Rgb8::new(200, 235, 255))
        }
    }
}

/// Clip progress in `[0, 1]`.
pub(crate) fn clip_progress(t: f64, duration: f64) -> f64 {
    clamp01(t / duration.max(0.001))
}

struct Env<'a> {
    canvas: Canvas,
    spec: &'a SceneSpec,
    t: f64,
    w: f64,
    h: f64,
    horizon: f64,
}

impl Env<'_> {
    fn color(&self, c: Rgb8) -> Rgb8 {
        c.saturate(self.spec.saturation)
    }

    fn full(&self) -> Rect {
        Rect::new(0.0, 0.0, self.w, self.h)
    }
}

/// Push the scene's element layers at `t`, bottom to top.
pub(crate) fn push_scene_layers(clip: &SceneClip, t: f64, stack: &mut LayerStack) -> MotionResult<()> {
    let canvas = clip.canvas();
    let spec = clip.spec();
    let env = Env {
        canvas,
        spec,
        t,
        w: canvas.w(),
        h: canvas.h(),
        horizon: (canvas.h() * HORIZON).trunc(),
    };
    let p = clip_progress(t, clip.duration());

    if spec.sun && spec.theme != Theme::Night {
        let x = (env.w * 0.25).trunc();
        let y = if spec.theme == Theme::Sunrise {
            (env.horizon - lerp(10.0, env.h * 0.36, p)).trunc()
        } else {
            (env.h * 0.24 + (t * 0.6).sin() * 6.0).trunc()
        };
        glow_circle(
            &env,
            stack,
            Point::new(x, y),
            (env.h * 0.07).trunc(),
            Rgb8::new(255, 220, 140),
            (52.0 * spec.softness).trunc(),
            120,
        )?;
    }

    if spec.moon {
        let x = (env.w * 0.75).trunc();
        let y = (env.h * 0.22 + (t * 0.3).sin() * 4.0).trunc();
        glow_circle(
            &env,
            stack,
            Point::new(x, y),
            (env.h * 0.055).trunc(),
            Rgb8::new(220, 230, 255),
            (36.0 * spec.softness).trunc(),
            90,
        )?;
    }

    if spec.clouds {
        let clear = spec.weather == Weather::Clear;
        let drift1 = ((t * 24.0).rem_euclid(env.w + 260.0)).trunc() - 260.0;
        let drift2 = ((t * 14.0).rem_euclid(env.w + 300.0)).trunc() - 300.0;
        cloud(&env, stack, drift1 + 220.0, (env.h * 0.18).trunc(), 1.25, if clear { 190 } else { 210 })?;
        cloud(&env, stack, drift2 + 640.0, (env.h * 0.26).trunc(), 0.95, if clear { 170 } else { 200 })?;
        if matches!(spec.weather, Weather::Cloudy | Weather::Rain | Weather::Snow) {
            cloud(&env, stack, drift1 + 940.0, (env.h * 0.16).trunc(), 1.45, 220)?;
        }
    }

    if spec.theme == Theme::Beach {
        beach(&env, stack)?;
    } else {
        let ground = if spec.theme == Theme::Snowy {
            Rgb8::new(235, 245, 255)
        } else {
            Rgb8::new(30, 110, 55)
        };
        hill(&env, stack, env.horizon + 30.0, ground, true)?;
        if spec.theme == Theme::Forest {
            hill(&env, stack, env.horizon + 70.0, Rgb8::new(20, 90, 45), false)?;
        }
    }

    if spec.trees || spec.theme == Theme::Forest {
        trees(&env, stack, 7)?;
    }
    if spec.skyline || spec.theme == Theme::City {
        skyline(&env, stack)?;
    }

    if spec.birds && !matches!(spec.theme, Theme::Rainy | Theme::Snowy) {
        let bx = (env.w * 0.62 + (t * 1.2).sin() * 55.0).trunc();
        let by = (env.h * 0.22 + (t * 1.05).cos() * 18.0).trunc();
        bird(&env, stack, bx, by, 16.0, 200)?;
        bird(&env, stack, bx + 40.0, by + 10.0, 14.0, 180)?;
    }

    match spec.weather {
        Weather::Rain => rain(&env, stack, 150)?,
        Weather::Snow => snow(&env, stack, 110)?,
        Weather::Clear | Weather::Cloudy => {}
    }
    Ok(())
}

fn glow_circle(
    env: &Env<'_>,
    stack: &mut LayerStack,
    center: Point,
    r: f64,
    color: Rgb8,
    glow: f64,
    halo_alpha: u8,
) -> MotionResult<()> {
    let color = env.color(color);
    if glow > 0.0 {
        let halo = Circle::new(center, r + glow);
        let blur = (0.7 * glow) as u32;
        push_union(
            env.canvas,
            stack,
            kurbo::Shape::bounding_box(&halo),
            blur,
            f32::from(halo_alpha) / 255.0,
            |s| s.fill(&halo, color, 255),
        )?;
    }
    let disc = Circle::new(center, r);
    push_painted(env.canvas, stack, kurbo::Shape::bounding_box(&disc), 0, |s| {
        s.fill(&disc, color, 255)
    })
}

fn cloud(env: &Env<'_>, stack: &mut LayerStack, x: f64, y: f64, scale: f64, alpha: u8) -> MotionResult<()> {
    let r = (34.0 * scale).trunc();
    let parts = [
        (x, y, r),
        (x + (0.9 * r).trunc(), y - (0.35 * r).trunc(), (1.15 * r).trunc()),
        (x + (2.0 * r).trunc(), y, r),
        (x + r, y + (0.35 * r).trunc(), (1.25 * r).trunc()),
    ];
    let disc = |(cx, cy, rr): (f64, f64, f64)| Rect::new(cx - rr, cy - rr, cx + rr, cy + rr);
    let bounds = parts[1..]
        .iter()
        .fold(disc(parts[0]), |acc, &part| acc.union(disc(part)));
    let color = env.color(Rgb8::WHITE);
    push_union(
        env.canvas,
        stack,
        bounds,
        (6.0 * scale) as u32,
        f32::from(alpha) / 255.0,
        |s| {
            for (cx, cy, rr) in parts {
                s.fill(&Circle::new((cx, cy), rr), color, 255);
            }
        },
    )
}

fn hill_ellipse(env: &Env<'_>, top: f64, bottom: f64) -> Ellipse {
    let half = (env.w / 2.0).trunc();
    Ellipse::from_rect(Rect::new(-half, top, env.w + half, bottom))
}

fn hill(env: &Env<'_>, stack: &mut LayerStack, y: f64, color: Rgb8, highlight: bool) -> MotionResult<()> {
    let band_top = y - (env.h * 0.28).trunc();
    let ground = hill_ellipse(env, y - (env.h * 0.25).trunc(), env.h + (env.h * 0.45).trunc());
    let band = hill_ellipse(env, band_top, env.h + (env.h * 0.40).trunc());
    let color = env.color(color);
    let bounds = Rect::new(0.0, band_top, env.w, env.h);
    push_painted(env.canvas, stack, bounds, 2, |s| {
        s.fill(&ground, color, 255);
        if highlight {
            s.fill(&band, Rgb8::WHITE, 30);
        }
    })
}

fn beach(env: &Env<'_>, stack: &mut LayerStack) -> MotionResult<()> {
    hill(env, stack, env.horizon + 20.0, Rgb8::new(235, 210, 155), true)?;

    let ocean_y = env.horizon - 10.0;
    let ocean = Rect::new(0.0, ocean_y, env.w, env.horizon + 21.0);
    let sea = env.color(Rgb8::new(60, 150, 220));
    push_painted(env.canvas, stack, ocean, 0, |s| s.fill(&ocean, sea, 255))?;

    let (x0, x1) = ((env.w * 0.10).trunc(), (env.w * 0.90).trunc());
    let waves: Vec<Arc> = (0..7)
        .map(|i| {
            let yy = ocean_y + 10.0 + f64::from(i) * 10.0 + ((env.t * 1.2 + f64::from(i)).sin() * 2.0).trunc();
            arc_in(Rect::new(x0, yy, x1, yy + 24.0), 10.0, 170.0)
        })
        .collect();
    let bounds = Rect::new(x0, ocean_y, x1, ocean_y + 110.0);
    push_union(env.canvas, stack, bounds, 1, 80.0 / 255.0, |s| {
        for wave in &waves {
            s.stroke(wave, 3.0, Rgb8::WHITE, 255);
        }
    })
}

/// Elliptical arc inscribed in `bbox`, angles in degrees clockwise from 3 o'clock.
fn arc_in(bbox: Rect, start_deg: f64, end_deg: f64) -> Arc {
    Arc {
        center: bbox.center(),
        radii: Vec2::new(bbox.width() / 2.0, bbox.height() / 2.0),
        start_angle: start_deg.to_radians(),
        sweep_angle: (end_deg - start_deg).to_radians(),
        x_rotation: 0.0,
    }
}

fn trees(env: &Env<'_>, stack: &mut LayerStack, density: u32) -> MotionResult<()> {
    let ground = env.horizon;
    let trunk = env.color(Rgb8::new(90, 60, 40));
    let leaf = env.color(Rgb8::new(40, 140, 70));
    let leaf_dark = env.color(Rgb8::new(30, 120, 60));
    let step = env.w / f64::from(density.max(1));
    let t = env.t;
    // Tallest trunk plus largest canopy, and the offset canopy below the ground line.
    let bounds = Rect::new(0.0, ground - 150.0, env.w, ground + 10.0);

    push_painted(env.canvas, stack, bounds, 1, |s| {
        let mut rng = Rng64::new(1234);
        for i in 0..density {
            let fi = f64::from(i);
            let x = ((fi + 0.5) * step + (t * 0.5 + fi).sin() * 6.0).trunc();
            let trunk_h = f64::from(rng.range_i32(60, 90));
            let trunk_w = f64::from(rng.range_i32(10, 14));
            let half = (trunk_w / 2.0).floor();
            s.fill(
                &RoundedRect::new(x - half, ground - trunk_h, x + half, ground, 6.0),
                trunk,
                255,
            );
            let rr = f64::from(rng.range_i32(40, 55));
            let top = ground - trunk_h;
            s.fill(&Circle::new((x, top), rr), leaf, 235);
            s.fill(&Circle::new((x - 18.0, top + 10.0), rr), leaf_dark, 210);
        }
    })
}

fn skyline(env: &Env<'_>, stack: &mut LayerStack) -> MotionResult<()> {
    let ground = env.horizon;
    let body = env.color(Rgb8::new(25, 35, 60));
    let lit = env.color(Rgb8::new(255, 230, 140));
    let dx = ((env.t * 0.2).sin() * 4.0).trunc();
    let w = env.w;
    let bounds = Rect::new(0.0, ground - 235.0, w, ground + 1.0);

    push_painted(env.canvas, stack, bounds, 2, |s| {
        let mut rng = Rng64::new(777);
        let mut x = 0.0;
        while x < w {
            let bw = f64::from(rng.range_i32(40, 90));
            let bh = f64::from(rng.range_i32(90, 230));
            s.fill(
                &RoundedRect::new(x + dx, ground - bh, x + bw + dx, ground, 8.0),
                body,
                220,
            );

            let mut wx = x + 10.0 + dx;
            let mut wy = ground - bh + 14.0;
            for _ in 0..rng.range_i32(6, 10) {
                s.fill(&Rect::new(wx, wy, wx + 8.0, wy + 10.0), lit, 140);
                wx += 14.0;
                if wx > x + bw - 12.0 + dx {
                    wx = x + 10.0 + dx;
                    wy += 18.0;
                }
            }
            x += bw + f64::from(rng.range_i32(6, 14));
        }
    })
}

fn bird(env: &Env<'_>, stack: &mut LayerStack, x: f64, y: f64, size: f64, alpha: u8) -> MotionResult<()> {
    let left = arc_in(Rect::new(x, y, x + size, y + size), 200.0, 340.0);
    let right = arc_in(Rect::new(x + size, y, x + 2.0 * size, y + size), 200.0, 340.0);
    let ink = Rgb8::new(30, 30, 30);
    let bounds = Rect::new(x, y, x + 2.0 * size, y + size).inflate(3.0, 3.0);
    push_union(env.canvas, stack, bounds, 0, f32::from(alpha) / 255.0, |s| {
        s.stroke(&left, 3.0, ink, 255);
        s.stroke(&right, 3.0, ink, 255);
    })
}

/// Particle position: a seeded base offset advanced by `velocity * t`, wrapped into the canvas.
pub(crate) fn particle_pos(base: i32, velocity: f64, t: f64, dim: u32) -> f64 {
    let advance = (t * velocity).trunc() as i64;
    (i64::from(base) + advance).rem_euclid(i64::from(dim.max(1))) as f64
}

fn rain(env: &Env<'_>, stack: &mut LayerStack, count: u32) -> MotionResult<()> {
    let (w, h) = (env.canvas.width, env.canvas.height);
    let color = Rgb8::new(200, 220, 255);
    let t = env.t;
    push_union(env.canvas, stack, env.full(), 1, 120.0 / 255.0, |s| {
        let mut rng = Rng64::new(999);
        for _ in 0..count {
            let x = particle_pos(rng.range_i32(0, w as i32), 240.0, t, w);
            let y = particle_pos(rng.range_i32(0, h as i32), 520.0, t, h);
            s.stroke(&Line::new((x, y), (x - 10.0, y + 22.0)), 2.0, color, 255);
        }
    })
}

fn snow(env: &Env<'_>, stack: &mut LayerStack, count: u32) -> MotionResult<()> {
    let (w, h) = (env.canvas.width, env.canvas.height);
    let t = env.t;
    push_union(env.canvas, stack, env.full(), 1, 170.0 / 255.0, |s| {
        let mut rng = Rng64::new(555);
        for _ in 0..count {
            let x = particle_pos(rng.range_i32(0, w as i32), 60.0, t, w);
            let y = particle_pos(rng.range_i32(0, h as i32), 120.0, t, h);
            let r = f64::from(rng.range_i32(2, 4));
            s.fill(&Circle::new((x, y), r), Rgb8::WHITE, 255);
        }
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/environment.rs"]
mod tests;
