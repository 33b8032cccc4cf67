mod host_queue;

pub use host_queue::HostQueue;
