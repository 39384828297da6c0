//! Configuration and system parameters for an SpMV run

use std::path::PathBuf;

/// Relative-error tolerance used when comparing parallel and sequential results
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Default file the result vector is written to
pub const DEFAULT_OUTPUT_PATH: &str = "output.txt";

/// System parameters for the parallel kernel
#[derive(Debug, Clone)]
pub struct SystemParameters {
    /// Number of worker threads
    pub n_threads: usize,
}

impl Default for SystemParameters {
    fn default() -> Self {
        Self {
            n_threads: num_cpus::get(), // Use all available cores
        }
    }
}

/// How rows are distributed over workers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Contiguous equal-sized row blocks, one per worker, fixed up front
    Static,
    /// Rows handed to rayon's adaptive splitter and balanced by work stealing
    WorkStealing,
}

/// Configuration for an SpMV run
#[derive(Debug, Clone)]
pub struct SpmvConfig {
    /// System parameters for the parallel kernel
    pub system_params: SystemParameters,

    /// Relative-error tolerance for verification
    pub tolerance: f64,

    /// Row scheduling strategy for the kernel
    pub schedule: Schedule,

    /// Whether to sort partitions on the worker pool
    pub parallel_sort: bool,

    /// Where the result vector is written
    pub output_path: PathBuf,
}

impl Default for SpmvConfig {
    fn default() -> Self {
        Self {
            system_params: SystemParameters::default(),
            tolerance: DEFAULT_TOLERANCE,
            schedule: Schedule::Static,
            parallel_sort: false,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl SpmvConfig {
    /// Create a config with a fixed number of workers
    pub fn with_threads(n_threads: usize) -> Self {
        Self {
            system_params: SystemParameters { n_threads },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SpmvConfig::default();
        assert!(config.system_params.n_threads >= 1);
        assert_eq!(config.tolerance, 1e-6);
        assert_eq!(config.schedule, Schedule::Static);
        assert!(!config.parallel_sort);
        assert_eq!(config.output_path, PathBuf::from("output.txt"));
    }

    #[test]
    fn test_with_threads() {
        let config = SpmvConfig::with_threads(3);
        assert_eq!(config.system_params.n_threads, 3);
        assert_eq!(config.tolerance, DEFAULT_TOLERANCE);
    }
}
