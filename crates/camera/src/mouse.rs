/// Turns absolute cursor positions into look offsets.
///
/// The first sample after construction or [`MouseLook::reset`] only records a
/// reference point, so a cursor that starts far from the viewport centre does
/// not produce a jump.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseLook {
    last: Option<(f32, f32)>,
}

impl MouseLook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the reference point. Call whenever mouse-look is (re)activated.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn is_anchored(&self) -> bool {
        self.last.is_some()
    }

    /// Offset from the previous sample as `(x, y)`.
    ///
    /// `y` is flipped so that moving the cursor up the screen is positive.
    pub fn offset(&mut self, x: f32, y: f32) -> (f32, f32) {
        let (last_x, last_y) = self.last.unwrap_or((x, y));
        self.last = Some((x, y));
        (x - last_x, last_y - y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_is_reference() {
        let mut mouse = MouseLook::new();
        assert_eq!(mouse.offset(500.0, 500.0), (0.0, 0.0));
        assert_eq!(mouse.offset(510.0, 495.0), (10.0, 5.0));
        assert_eq!(mouse.offset(510.0, 495.0), (0.0, 0.0));
    }

    #[test]
    fn reset_reanchors() {
        let mut mouse = MouseLook::new();
        mouse.offset(0.0, 0.0);
        mouse.offset(20.0, 20.0);
        mouse.reset();
        assert!(!mouse.is_anchored());
        assert_eq!(mouse.offset(900.0, 10.0), (0.0, 0.0));
        assert!(mouse.is_anchored());
        assert_eq!(mouse.offset(890.0, 30.0), (-10.0, -20.0));
    }
}
