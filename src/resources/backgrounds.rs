//! Built-in backgrounds, painted in code so they ship inside the binary.
//!
//! Every generator is deterministic: the same size always produces the same
//! pixels.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_ellipse_mut, draw_polygon_mut};
use imageproc::point::Point;

/// Size the stock images are generated at; the scene stretches them.
pub const STOCK_WIDTH: u32 = 800;
pub const STOCK_HEIGHT: u32 = 600;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StockBackground {
    Mandelbrot,
    Earthrise,
    Sunset,
    Cloud,
    EagleNebula,
}

impl StockBackground {
    pub const ALL: [StockBackground; 5] = [
        StockBackground::Mandelbrot,
        StockBackground::Earthrise,
        StockBackground::Sunset,
        StockBackground::Cloud,
        StockBackground::EagleNebula,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StockBackground::Mandelbrot => "Mandelbrot",
            StockBackground::Earthrise => "Earthrise",
            StockBackground::Sunset => "Sunset",
            StockBackground::Cloud => "Cloud",
            StockBackground::EagleNebula => "Eagle_nebula",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name().eq_ignore_ascii_case(name))
    }

    pub fn render(self, width: u32, height: u32) -> RgbaImage {
        match self {
            StockBackground::Mandelbrot => mandelbrot(width, height),
            StockBackground::Earthrise => earthrise(width, height),
            StockBackground::Sunset => sunset(width, height),
            StockBackground::Cloud => cloud(width, height),
            StockBackground::EagleNebula => eagle_nebula(width, height),
        }
    }
}

impl std::fmt::Display for StockBackground {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Integer hash used to scatter stars and texture without an RNG.
fn hash2(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = x.wrapping_mul(0x8da6_b343) ^ y.wrapping_mul(0xd816_3841) ^ seed.wrapping_mul(0xcb1a_b31f);
    h ^= h >> 13;
    h = h.wrapping_mul(0x5bd1_e995);
    h ^ (h >> 15)
}

fn lerp(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t.clamp(0.0, 1.0)).round() as u8
}

fn mix(a: [u8; 3], b: [u8; 3], t: f32) -> Rgba<u8> {
    Rgba([lerp(a[0], b[0], t), lerp(a[1], b[1], t), lerp(a[2], b[2], t), 255])
}

fn add_glow(px: &mut Rgba<u8>, color: [u8; 3], strength: f32) {
    for c in 0..3 {
        px[c] = (px[c] as f32 + color[c] as f32 * strength).min(255.0) as u8;
    }
}

fn scatter_stars(img: &mut RgbaImage, seed: u32, density: u32, max_y: u32) {
    let (w, h) = img.dimensions();
    for y in 0..h.min(max_y) {
        for x in 0..w {
            let n = hash2(x, y, seed);
            if n % density == 0 {
                let v = 150 + (n >> 24) as u8 % 106;
                img.put_pixel(x, y, Rgba([v, v, v.saturating_add(10), 255]));
            }
        }
    }
}

fn mandelbrot(width: u32, height: u32) -> RgbaImage {
    const MAX_ITER: u32 = 96;
    let mut img = RgbaImage::new(width, height);
    let (cx, cy, span) = (-0.75f64, 0.0f64, 3.2f64);
    let scale = span / width.max(1) as f64;

    for (x, y, px) in img.enumerate_pixels_mut() {
        let c_re = cx + (x as f64 - width as f64 / 2.0) * scale;
        let c_im = cy + (y as f64 - height as f64 / 2.0) * scale;
        let (mut z_re, mut z_im) = (0.0f64, 0.0f64);
        let mut i = 0;
        while i < MAX_ITER && z_re * z_re + z_im * z_im <= 4.0 {
            let t = z_re * z_re - z_im * z_im + c_re;
            z_im = 2.0 * z_re * z_im + c_im;
            z_re = t;
            i += 1;
        }
        *px = if i == MAX_ITER {
            Rgba([0, 0, 0, 255])
        } else {
            let t = (i as f32 / MAX_ITER as f32).sqrt();
            if t < 0.5 {
                mix([10, 10, 60], [30, 140, 220], t * 2.0)
            } else {
                mix([30, 140, 220], [255, 220, 120], (t - 0.5) * 2.0)
            }
        };
    }
    img
}

fn earthrise(width: u32, height: u32) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(width, height, Rgba([4, 4, 10, 255]));
    scatter_stars(&mut img, 7, 251, height);

    let (w, h) = (width as i32, height as i32);
    let earth_r = (w.min(h) / 7).max(1);
    let earth = (w * 2 / 3, h * 2 / 5);
    draw_filled_circle_mut(&mut img, earth, earth_r, Rgba([40, 90, 190, 255]));
    // Cloud bands and the night side.
    draw_filled_ellipse_mut(
        &mut img,
        (earth.0 - earth_r / 4, earth.1 - earth_r / 3),
        (earth_r / 2).max(1),
        (earth_r / 6).max(1),
        Rgba([230, 235, 245, 255]),
    );
    draw_filled_ellipse_mut(
        &mut img,
        (earth.0 + earth_r / 5, earth.1 + earth_r / 4),
        (earth_r / 3).max(1),
        (earth_r / 8).max(1),
        Rgba([210, 220, 235, 255]),
    );
    draw_filled_ellipse_mut(
        &mut img,
        (earth.0 + earth_r / 2, earth.1),
        (earth_r / 2).max(1),
        earth_r,
        Rgba([4, 4, 10, 255]),
    );

    // Lunar horizon: a huge grey disc whose top edge crosses the lower third.
    let moon_r = w.max(h) * 2;
    draw_filled_circle_mut(&mut img, (w / 2, h * 3 / 4 + moon_r), moon_r, Rgba([120, 118, 112, 255]));
    for (x, y, px) in img.enumerate_pixels_mut() {
        if px[0] == 120 && px[1] == 118 {
            let n = (hash2(x / 3, y / 3, 11) % 40) as i32 - 20;
            let shade = (120 + n - (y as i32 - h * 3 / 4) / 4).clamp(30, 200) as u8;
            *px = Rgba([shade, shade.saturating_sub(2), shade.saturating_sub(8), 255]);
        }
    }
    img
}

fn sunset(width: u32, height: u32) -> RgbaImage {
    let mut img = RgbaImage::new(width, height);
    let horizon = height * 2 / 3;

    for (x, y, px) in img.enumerate_pixels_mut() {
        *px = if y < horizon {
            let t = y as f32 / horizon.max(1) as f32;
            if t < 0.6 {
                mix([40, 30, 90], [220, 90, 90], t / 0.6)
            } else {
                mix([220, 90, 90], [255, 180, 70], (t - 0.6) / 0.4)
            }
        } else {
            let t = (y - horizon) as f32 / (height - horizon).max(1) as f32;
            let ripple = (hash2(x / 24, y / 3, 3) % 24) as f32 / 255.0;
            mix([90, 50, 70], [20, 15, 40], t - ripple)
        };
    }

    let sun_r = (width.min(height) / 8).max(1) as i32;
    draw_filled_circle_mut(
        &mut img,
        (width as i32 / 2, horizon as i32 - sun_r / 3),
        sun_r,
        Rgba([255, 225, 140, 255]),
    );
    // Reflection of the sun on the water.
    for y in horizon..height {
        let t = (y - horizon) as f32 / (height - horizon).max(1) as f32;
        let half = ((1.0 - t) * sun_r as f32) as i32;
        let band = (y - horizon) % 6 < 2;
        for x in (width as i32 / 2 - half).max(0)..(width as i32 / 2 + half).min(width as i32) {
            let px = img.get_pixel_mut(x as u32, y);
            if band {
                *px = mix([255, 200, 120], [px[0], px[1], px[2]], t);
            } else {
                *px = mix([px[0], px[1], px[2]], [90, 50, 70], 0.3);
            }
        }
    }
    img
}

fn cloud(width: u32, height: u32) -> RgbaImage {
    let mut img = RgbaImage::new(width, height);
    for (_, y, px) in img.enumerate_pixels_mut() {
        *px = mix([70, 130, 210], [180, 215, 245], y as f32 / height.max(1) as f32);
    }

    let (w, h) = (width as i32, height as i32);
    let unit = (w.min(h) / 10).max(1);
    // (x, y, rx, ry) in units of `unit`, relative to the cloud center.
    let puffs: [(i32, i32, i32, i32); 9] = [
        (-4, 1, 3, 2),
        (-2, 0, 3, 2),
        (0, -1, 3, 3),
        (2, 0, 3, 2),
        (4, 1, 3, 2),
        (-1, 1, 5, 2),
        (1, 1, 5, 2),
        (-3, -1, 2, 2),
        (3, -1, 2, 2),
    ];
    let shadow = Rgba([205, 212, 225, 255]);
    let white = Rgba([250, 250, 252, 255]);
    for (cx, cy) in [(w / 2, h / 2), (w / 5, h / 4), (w * 4 / 5, h * 3 / 10)] {
        for &(dx, dy, rx, ry) in &puffs {
            let center = (cx + dx * unit / 2, cy + dy * unit / 2 + unit / 6);
            draw_filled_ellipse_mut(&mut img, center, rx * unit / 2, ry * unit / 2, shadow);
        }
        for &(dx, dy, rx, ry) in &puffs {
            let center = (cx + dx * unit / 2, cy + dy * unit / 2);
            draw_filled_ellipse_mut(&mut img, center, (rx * unit / 2 - 2).max(1), (ry * unit / 2 - 2).max(1), white);
        }
    }
    img
}

fn eagle_nebula(width: u32, height: u32) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(width, height, Rgba([8, 12, 20, 255]));
    let (fw, fh) = (width.max(1) as f32, height.max(1) as f32);

    // Soft gas clouds: (center x, center y, radius, color), fractions of the canvas.
    let clouds: [(f32, f32, f32, [u8; 3]); 5] = [
        (0.3, 0.3, 0.45, [30, 110, 120]),
        (0.7, 0.4, 0.40, [160, 90, 40]),
        (0.5, 0.8, 0.35, [120, 70, 50]),
        (0.2, 0.75, 0.30, [40, 80, 110]),
        (0.8, 0.15, 0.25, [90, 130, 100]),
    ];
    for (x, y, px) in img.enumerate_pixels_mut() {
        let (u, v) = (x as f32 / fw, y as f32 / fh);
        for &(cx, cy, r, color) in &clouds {
            let d2 = ((u - cx) * (u - cx) + (v - cy) * (v - cy)) / (r * r);
            let grain = (hash2(x / 2, y / 2, 5) % 64) as f32 / 255.0;
            add_glow(px, color, (-d2 * 2.5).exp() * (0.75 + grain));
        }
    }

    scatter_stars(&mut img, 13, 173, height);

    // Three dark pillars rising from the bottom edge.
    let (w, h) = (width as i32, height as i32);
    let pillars: [(i32, i32, i32); 3] = [(w / 4, w / 14, h / 3), (w / 2, w / 10, h / 6), (w * 3 / 4, w / 18, h / 2)];
    for (x, half, top) in pillars {
        let poly = [
            Point::new(x - half * 2, h),
            Point::new(x - half, top + half),
            Point::new(x, top),
            Point::new(x + half, top + half / 2),
            Point::new(x + half * 2, h),
        ];
        if poly.windows(2).all(|p| p[0] != p[1]) && poly[0] != poly[4] {
            draw_polygon_mut(&mut img, &poly, Rgba([45, 32, 28, 255]));
        }
        draw_filled_circle_mut(&mut img, (x, top), (half / 2).max(1), Rgba([230, 170, 120, 255]));
    }
    img
}
