use crate::env::Observation;

/// Display-ready projection of an observation.
///
/// Pure function of the observation and the screen size; holds no reference
/// back into the environment and keeps no state between frames.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Screen-space width of one grid cell
    pub pix_width: f32,
    /// Screen-space height of one grid cell
    pub pix_height: f32,
    /// Per-cell grayscale shade in row-major order: 0.0 = ink, 1.0 = blank
    pub shades: Vec<f32>,
    /// Nib center in screen space
    pub nib_x: f32,
    pub nib_y: f32,
}

impl Frame {
    /// Project an observation onto a screen of the given pixel size.
    ///
    /// Cell (x, y) maps to the rectangle with top-left corner
    /// (x*pix_width, y*pix_height); the nib maps to its cell's center.
    pub fn project(obs: &Observation, cols: i32, rows: i32, screen_w: f32, screen_h: f32) -> Frame {
        let pix_width = screen_w / cols as f32;
        let pix_height = screen_h / rows as f32;

        let shades = obs.pixels.iter().map(|&v| 1.0 - v as f32).collect();

        Frame {
            pix_width,
            pix_height,
            shades,
            nib_x: pix_width * (obs.pos[0] as f32 + 0.5),
            nib_y: pix_height * (obs.pos[1] as f32 + 0.5),
        }
    }

    /// Top-left screen corner of the cell at (x, y)
    pub fn cell_origin(&self, x: i32, y: i32) -> (f32, f32) {
        (x as f32 * self.pix_width, y as f32 * self.pix_height)
    }
}
