#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
pub enum IntroScene {
    Pending,      // Mounted, timeline not started
    Particles,    // Flowers streaming toward the center
    LogoRevealed, // Header and logo faded in at the center
    Relocating,   // Header moving to its final spot, waiting for the transition
    NavRevealed,  // Collage logo and nav shown, links staggering in
    Complete,     // Hero shown
}
