use rand::Rng;

use crate::animation::{Animation, Easing, Keyframe, Length};
use crate::constants::*;
use crate::document::{Document, ElementId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Corners are assigned round-robin by spawn order.
    pub fn for_index(index: usize) -> Self {
        match index % 4 {
            0 => Corner::TopLeft,
            1 => Corner::TopRight,
            2 => Corner::BottomLeft,
            _ => Corner::BottomRight,
        }
    }

    /// Position in viewport percent.
    pub fn origin(self) -> (f32, f32) {
        match self {
            Corner::TopLeft => (0.0, 0.0),
            Corner::TopRight => (100.0, 0.0),
            Corner::BottomLeft => (0.0, 100.0),
            Corner::BottomRight => (100.0, 100.0),
        }
    }
}

/// Randomized parameters of one flower.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSpec {
    pub size: f32,
    pub color: &'static str,
    pub corner: Corner,
    /// Landing point in viewport percent.
    pub destination: (f32, f32),
    pub duration_ms: u64,
}

impl ParticleSpec {
    pub fn random<R: Rng + ?Sized>(index: usize, rng: &mut R) -> Self {
        let size = rng.random_range(10.0..30.0);
        let color = if rng.random_bool(0.5) { PARTICLE_COLORS[0] } else { PARTICLE_COLORS[1] };
        let destination = (rng.random_range(45.0..55.0), rng.random_range(45.0..55.0));
        let duration_ms = rng.random_range(1000..3000);
        Self {
            size,
            color,
            corner: Corner::for_index(index),
            destination,
            duration_ms,
        }
    }

    /// Flight from the corner to the destination, shrinking and fading out.
    pub fn flight(&self, start_ms: u64) -> Animation {
        let (sx, sy) = self.corner.origin();
        let (ex, ey) = self.destination;
        Animation {
            from: Keyframe::new(Length::Vw(sx), Length::Vh(sy), 1.0, 0.7),
            to: Keyframe::new(Length::Vw(ex), Length::Vh(ey), 0.0, 0.0),
            start_ms,
            delay_ms: 0,
            duration_ms: self.duration_ms,
            easing: Easing::CubicBezier(0.4, 0.0, 0.2, 1.0),
        }
    }
}

/// Creates the flower element inside `container` and starts its flight.
pub fn spawn<D: Document>(doc: &mut D, container: ElementId, spec: &ParticleSpec, now_ms: u64) -> ElementId {
    let flower = doc.create_element("div");
    doc.add_class(flower, PARTICLE_CLASS);
    let size = format!("{:.1}px", spec.size);
    doc.set_style(flower, "width", &size);
    doc.set_style(flower, "height", &size);
    doc.set_style(flower, "background-color", spec.color);
    doc.append_child(container, flower);
    doc.animate(flower, spec.flight(now_ms));
    flower
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn random_specs_stay_in_their_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        for i in 0..200 {
            let spec = ParticleSpec::random(i, &mut rng);
            assert!((10.0..30.0).contains(&spec.size));
            assert!(PARTICLE_COLORS.contains(&spec.color));
            assert!((45.0..55.0).contains(&spec.destination.0));
            assert!((45.0..55.0).contains(&spec.destination.1));
            assert!((1000..3000).contains(&spec.duration_ms));
            assert_eq!(spec.corner, Corner::for_index(i));
        }
    }

    #[test]
    fn corners_cycle_every_four() {
        let corners: Vec<_> = (0..5).map(Corner::for_index).collect();
        assert_eq!(
            corners,
            vec![
                Corner::TopLeft,
                Corner::TopRight,
                Corner::BottomLeft,
                Corner::BottomRight,
                Corner::TopLeft,
            ]
        );
    }

    #[test]
    fn flight_goes_from_corner_to_destination() {
        let spec = ParticleSpec {
            size: 12.0,
            color: PARTICLE_COLORS[0],
            corner: Corner::BottomRight,
            destination: (50.0, 48.0),
            duration_ms: 2000,
        };
        let flight = spec.flight(300);
        assert_eq!(flight.from.translate_x, Length::Vw(100.0));
        assert_eq!(flight.from.translate_y, Length::Vh(100.0));
        assert_eq!(flight.from.opacity, 0.7);
        assert_eq!(flight.to.translate_x, Length::Vw(50.0));
        assert_eq!(flight.to.scale, 0.0);
        assert_eq!(flight.end_ms(), 2300);
    }
}
