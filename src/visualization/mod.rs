pub mod headless;
pub mod particles_vis3d;
