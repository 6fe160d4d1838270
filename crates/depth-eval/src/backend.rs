//! Concrete backend for the `depth-eval` binary.
//!
//! Library code stays generic over [`Backend`](burn::tensor::backend::Backend).
//! The binary needs one concrete choice, taken from the enabled feature in the
//! order `cuda`, `wgpu`, then the CPU default.

use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(feature = "cuda")] {
        use burn::backend::cuda::{Cuda, CudaDevice};

        pub type SelectedBackend = Cuda;
        pub type SelectedDevice = CudaDevice;

        /// First CUDA device.
        pub fn create_device() -> SelectedDevice {
            CudaDevice::default()
        }

        pub const fn get_backend_name() -> &'static str {
            "CUDA (NVIDIA GPU)"
        }
    } else if #[cfg(feature = "wgpu")] {
        use burn::backend::wgpu::{Wgpu, WgpuDevice};

        pub type SelectedBackend = Wgpu;
        pub type SelectedDevice = WgpuDevice;

        /// Default adapter picked by wgpu.
        pub fn create_device() -> SelectedDevice {
            WgpuDevice::default()
        }

        pub const fn get_backend_name() -> &'static str {
            "WGPU (GPU)"
        }
    } else {
        use burn::backend::ndarray::{NdArray, NdArrayDevice};

        pub type SelectedBackend = NdArray;
        pub type SelectedDevice = NdArrayDevice;

        pub fn create_device() -> SelectedDevice {
            NdArrayDevice::Cpu
        }

        pub const fn get_backend_name() -> &'static str {
            "NdArray (CPU)"
        }
    }
}

#[cfg(all(test, not(any(feature = "cuda", feature = "wgpu"))))]
mod tests {
    use burn::tensor::Tensor;

    use super::*;

    #[test]
    fn cpu_backend_is_the_default() {
        assert_eq!(get_backend_name(), "NdArray (CPU)");

        let device = create_device();
        let ones = Tensor::<SelectedBackend, 2>::ones([2, 2], &device);
        assert_eq!(ones.dims(), [2, 2]);
    }
}
