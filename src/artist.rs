use image::{GrayImage, Luma};
use serde::{Deserialize, Serialize};
use std::path::Path;

const INK: Luma<u8> = Luma([0u8]);
const PAPER: Luma<u8> = Luma([255u8]);

/// Placement parameters for one stamped triangle
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Triangle {
    pub off_x: f32,
    pub off_y: f32,
    pub w_scale: f32,
    pub h_scale: f32,
    pub rot: f32,
}

/// A randomly generated training image: black triangles on white paper.
///
/// Each triangle is the equilateral template scaled per axis, rotated, then
/// translated, and filled into the canvas. The parameter list doubles as
/// the training label.
pub struct TriangleImage {
    pub width: u32,
    pub height: u32,
    pub img: GrayImage,
    pub triangles: Vec<Triangle>,
}

impl TriangleImage {
    /// Create a blank white canvas
    pub fn new(width: u32, height: u32) -> Self {
        TriangleImage {
            width,
            height,
            img: GrayImage::from_pixel(width, height, PAPER),
            triangles: Vec::new(),
        }
    }

    /// Template triangle: middle-centered, side length 0.25 * width
    fn template(&self) -> [(f32, f32); 3] {
        let (w, h) = (self.width as f32, self.height as f32);
        [
            (0.0, -0.144 * h),
            (0.125 * w, 0.072 * h),
            (-0.125 * w, 0.072 * h),
        ]
    }

    /// Stamp one triangle: template vertices are scaled, rotated, then
    /// translated, and the resulting face is filled black
    pub fn draw_triangle(&mut self, tri: Triangle) {
        let (sin, cos) = tri.rot.sin_cos();
        let verts = self.template().map(|(x, y)| {
            let (sx, sy) = (tri.w_scale * x, tri.h_scale * y);
            (
                tri.off_x + cos * sx - sin * sy,
                tri.off_y + sin * sx + cos * sy,
            )
        });
        self.fill_triangle(verts);
        self.triangles.push(tri);
    }

    /// Draw `num_tri` triangles with random placement parameters
    pub fn rand_triangles(&mut self, num_tri: usize, rng: &mut fastrand::Rng) {
        let (w, h) = (self.width as f32, self.height as f32);
        for _ in 0..num_tri {
            self.draw_triangle(Triangle {
                off_x: w * rng.f32(),
                off_y: h * rng.f32(),
                w_scale: (2.0 * rng.f32()).clamp(0.1, 4.0),
                h_scale: (2.0 * rng.f32()).clamp(0.1, 4.0),
                rot: 2.0 * std::f32::consts::PI * rng.f32(),
            });
        }
    }

    /// Fill a triangle given in screen coordinates.
    ///
    /// Edge-function rasterization over the clamped bounding box; a pixel
    /// center is inside when all three signed edge values share a sign.
    fn fill_triangle(&mut self, verts: [(f32, f32); 3]) {
        let [a, b, c] = verts;
        let edge = |p: (f32, f32), q: (f32, f32), r: (f32, f32)| {
            (q.0 - p.0) * (r.1 - p.1) - (q.1 - p.1) * (r.0 - p.0)
        };

        let min_x = a.0.min(b.0).min(c.0).floor().max(0.0) as u32;
        let min_y = a.1.min(b.1).min(c.1).floor().max(0.0) as u32;
        let max_x = (a.0.max(b.0).max(c.0).ceil() as i64).min(self.width as i64 - 1);
        let max_y = (a.1.max(b.1).max(c.1).ceil() as i64).min(self.height as i64 - 1);
        if max_x < min_x as i64 || max_y < min_y as i64 {
            return;
        }

        for py in min_y..=max_y as u32 {
            for px in min_x..=max_x as u32 {
                let p = (px as f32 + 0.5, py as f32 + 0.5);
                let e0 = edge(a, b, p);
                let e1 = edge(b, c, p);
                let e2 = edge(c, a, p);
                let inside = (e0 >= 0.0 && e1 >= 0.0 && e2 >= 0.0)
                    || (e0 <= 0.0 && e1 <= 0.0 && e2 <= 0.0);
                if inside {
                    self.img.put_pixel(px, py, INK);
                }
            }
        }
    }

    /// Fraction of ink pixels in the canvas
    pub fn ink_ratio(&self) -> f32 {
        let inked = self.img.pixels().filter(|&&p| p == INK).count();
        inked as f32 / (self.width * self.height) as f32
    }

    /// Save the canvas as a PNG file
    pub fn save_png(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        self.img.save(path)?;
        Ok(())
    }
}

/// A batch of generated images plus their triangle-parameter labels
pub struct ImageBundle {
    pub images: Vec<TriangleImage>,
}

impl ImageBundle {
    /// Generate a bundle deterministically from a seed
    pub fn generate(batch_size: usize, num_tri: usize, width: u32, height: u32, seed: u64) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let images = (0..batch_size)
            .map(|_| {
                let mut img = TriangleImage::new(width, height);
                img.rand_triangles(num_tri, &mut rng);
                img
            })
            .collect();
        ImageBundle { images }
    }

    /// Save the bundle into a directory: one PNG per image plus a
    /// `triangles.json` label manifest indexed in image order
    pub fn save(&self, dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::create_dir_all(dir)?;
        for (i, image) in self.images.iter().enumerate() {
            image.save_png(&dir.join(format!("image_{:03}.png", i)))?;
        }
        let labels: Vec<&Vec<Triangle>> = self.images.iter().map(|img| &img.triangles).collect();
        let json = serde_json::to_string_pretty(&labels)?;
        std::fs::write(dir.join("triangles.json"), json)?;
        Ok(())
    }
}
