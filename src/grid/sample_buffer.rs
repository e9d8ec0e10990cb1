use super::{ElementType, Sample};

/// Untyped blob of samples read from an untagged raw file.
///
/// The geometry is unknown at this point; only the element type, supplied by
/// the caller, says how wide each sample is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    bytes: Vec<u8>,
    element_type: ElementType,
}

impl SampleBuffer {
    pub fn new(bytes: Vec<u8>, element_type: ElementType) -> Self {
        Self {
            bytes,
            element_type,
        }
    }

    /// Wraps samples already in memory, like a frame handed over by a
    /// capture device.
    pub fn from_samples<T: Sample>(samples: &[T]) -> Self {
        Self::new(bytemuck::cast_slice::<T, u8>(samples).to_vec(), T::ELEMENT_TYPE)
    }

    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// Number of samples. A trailing partial sample counts as one, so a file
    /// cut in the middle of a sample never matches its geometry.
    pub fn len(&self) -> usize {
        let size = self.element_type.size_bytes();
        (self.bytes.len() + size - 1) / size
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decodes the native-endian samples. The caller checks that the byte
    /// length is a multiple of the sample size.
    pub(crate) fn to_samples<T: Sample>(&self) -> Vec<T> {
        debug_assert_eq!(T::ELEMENT_TYPE, self.element_type);
        bytemuck::allocation::pod_collect_to_vec(self.bytes.as_slice())
    }
}
