use crate::domain::entities::Segment;
use tch::Tensor;

impl Segment {
    /// 1-D float tensor of the samples, on the CPU.
    pub fn to_tensor(&self) -> Tensor {
        Tensor::from_slice(&self.samples)
    }
}

impl From<Segment> for Tensor {
    fn from(segment: Segment) -> Self {
        segment.to_tensor()
    }
}
