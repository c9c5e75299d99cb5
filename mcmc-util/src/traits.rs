use nalgebra::DVector;

/// A flat draw of all sampled parameters
pub trait SampleParam: Clone {
    fn dim(&self) -> usize;
    fn as_slice(&self) -> &[f32];
}

impl SampleParam for DVector<f32> {
    fn dim(&self) -> usize {
        self.len()
    }

    fn as_slice(&self) -> &[f32] {
        self.as_slice()
    }
}

impl SampleParam for Vec<f32> {
    fn dim(&self) -> usize {
        self.len()
    }

    fn as_slice(&self) -> &[f32] {
        self
    }
}
