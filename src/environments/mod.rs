pub mod gaussian_bandit;

pub use gaussian_bandit::{ argmax, ActionId, GaussianBanditEnvironment };
