mod tanh;

pub use tanh::Tanh;
