use crate::config::Resolution;

/// Destination rectangle in drawable pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

/// Where the video texture lands on the render target for one present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PresentLayout {
    pub scale_x: u32,
    pub scale_y: u32,
    pub dest: Rect,
}

impl PresentLayout {
    /// Integer scale of the drawable surface against the logical display,
    /// with the video placed flush left and one line above the bottom edge.
    ///
    /// Truncating division means a drawable that is not an exact multiple of
    /// the logical size renders smaller than it could. A drawable smaller than
    /// the logical display gives a zero-sized rectangle.
    pub fn compute(drawable: (u32, u32), display: Resolution, video: Resolution) -> Self {
        let scale_x = drawable.0 / display.width;
        let scale_y = drawable.1 / display.height;

        let top = display.height as i64 - video.height as i64 - 1;

        Self {
            scale_x,
            scale_y,
            dest: Rect {
                x: 0,
                y: (scale_y as i64 * top) as i32,
                w: scale_x * video.width,
                h: scale_y * video.height,
            },
        }
    }
}
