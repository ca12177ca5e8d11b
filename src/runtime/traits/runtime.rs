//! Core trait for compute backends

/// Core trait for compute backends
///
/// `Runtime` abstracts over compute devices. It uses static dispatch via
/// generics, so tensors and executors are parameterized by the runtime.
///
/// # Associated Types
///
/// - `Device`: Identifies a specific compute unit (e.g., npu:0, npu:1)
/// - `Client`: Handles operation dispatch and synchronization
///
/// # Example
///
/// ```ignore
/// let device = CustomRuntime::default_device();
/// let client = CustomRuntime::default_client(&device);
/// ```
pub trait Runtime: Clone + Send + Sync + std::fmt::Debug + 'static {
    /// Device identifier type
    type Device: super::Device;

    /// Client for dispatching operations
    type Client: super::RuntimeClient<Self>;

    /// Human-readable name of this runtime
    fn name() -> &'static str;

    /// Get the default device
    fn default_device() -> Self::Device;

    /// Get the default client for a device
    fn default_client(device: &Self::Device) -> Self::Client;

    /// Integer version code of the toolkit backing this runtime
    ///
    /// Used to gate features (such as bf16 kernels) that older toolkits lack.
    fn toolkit_version() -> u32;
}
