/// Linear RGB colour, each channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color { r, g, b }
    }

    /// Interpolate towards `other`. `t = 0` yields `self`, `t = 1` yields `other`.
    pub fn lerp(&self, other: &Color, t: f32) -> Color {
        assert!((0f32..=1f32).contains(&t), "lerp t lives in [0, 1]");

        // interpolate a channel
        let f = |a: f32, b: f32| a * (1f32 - t) + b * t;

        Color {
            r: f(self.r, other.r),
            g: f(self.g, other.g),
            b: f(self.b, other.b),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }

    /// Relative luminance (Rec. 709 weights).
    pub fn luminance(&self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }
}

/// How a child derives its colour from its parent when a node splits.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ColorRule {
    /// Children carry the parent's colour unchanged.
    #[default]
    Inherit,

    /// Every level moves `step` of the way from the parent's colour towards `to`.
    DepthFade { to: Color, step: f32 },
}

impl ColorRule {
    /// Colour of a child whose parent is coloured `parent`. A NaN `step` fades nothing.
    pub fn child_color(&self, parent: Color) -> Color {
        match *self {
            ColorRule::Inherit => parent,
            ColorRule::DepthFade { step, .. } if step.is_nan() => parent,
            ColorRule::DepthFade { to, step } => parent.lerp(&to, step.clamp(0f32, 1f32)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Color;
    use super::ColorRule;

    #[test]
    fn lerp_endpoints() {
        let a = Color::BLACK;
        let b = Color::WHITE;

        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        assert_eq!(a.lerp(&b, 0.5), Color::rgb(0.5, 0.5, 0.5));
    }

    #[test]
    #[should_panic]
    fn lerp_out_of_range() {
        Color::BLACK.lerp(&Color::WHITE, 1.5);
    }

    #[test]
    fn inherit_keeps_parent() {
        assert_eq!(ColorRule::Inherit.child_color(Color::YELLOW), Color::YELLOW);
    }

    #[test]
    fn depth_fade_moves_towards_target() {
        let rule = ColorRule::DepthFade {
            to: Color::BLACK,
            step: 0.5,
        };

        assert_eq!(rule.child_color(Color::WHITE), Color::rgb(0.5, 0.5, 0.5));
        assert_eq!(rule.child_color(Color::BLACK), Color::BLACK);
    }

    #[test]
    fn nan_fade_step_keeps_parent() {
        let rule = ColorRule::DepthFade {
            to: Color::BLACK,
            step: f32::NAN,
        };

        assert_eq!(rule.child_color(Color::YELLOW), Color::YELLOW);
    }

    #[test]
    fn non_finite_channels() {
        assert!(Color::YELLOW.is_finite());
        assert!(!Color::rgb(0.0, f32::INFINITY, 0.0).is_finite());
        assert!(!Color::rgb(0.0, 0.0, f32::NAN).is_finite());
    }
}
