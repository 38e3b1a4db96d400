/// Hyperbolic tangent activation, saturates every value into `(-1, 1)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tanh;

impl Tanh {
    pub fn f(&self, z: f64) -> f64 {
        z.tanh()
    }
}
