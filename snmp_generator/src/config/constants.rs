pub mod compile_time {
    pub mod batch {
        /// Upper bound on worker threads used for module generation
        /// RESOURCE: Each worker holding a cloned tree costs a full tree copy
        pub const MAX_WORKER_THREADS: usize = 8;

        /// Default worker count when the host parallelism is unknown
        pub const DEFAULT_WORKER_THREADS: usize = 4;
    }

    pub mod logging {
        /// Maximum events retained per module by the error collector
        /// RESOURCE: Prevents unbounded growth for MIBs with many broken indexes
        pub const MAX_EVENTS_PER_MODULE: usize = 1_000;

        /// Ring buffer size for the in-memory logger
        pub const LOG_BUFFER_SIZE: usize = 10_000;

        /// Maximum log message length, longer messages are truncated
        pub const MAX_LOG_MESSAGE_LENGTH: usize = 4_096;
    }
}
