//! Parallel processing primitives
//!
//! Order-preserving helpers over the global rayon pool. Without the
//! `parallel` feature every helper falls back to a sequential iterator, so
//! callers never need their own `cfg` switches.

use std::sync::Once;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

static INIT: Once = Once::new();

// Below this many items the pool overhead outweighs the work.
#[cfg(feature = "parallel")]
const SEQUENTIAL_CUTOFF: usize = 8;

/// Default number of worker threads
pub fn default_num_threads() -> usize {
    num_cpus::get()
}

/// Configure the global thread pool. Only the first call has an effect;
/// `0` means one thread per CPU.
pub fn initialize_thread_pool(num_threads: usize) {
    INIT.call_once(|| {
        let num_threads = if num_threads == 0 {
            default_num_threads()
        } else {
            num_threads
        };

        #[cfg(feature = "parallel")]
        {
            let built = rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .thread_name(|idx| format!("fspep-worker-{}", idx))
                .build_global();

            match built {
                Ok(()) => log::info!("Initialized thread pool with {} threads", num_threads),
                Err(e) => log::warn!("Global thread pool already configured: {}", e),
            }
        }

        #[cfg(not(feature = "parallel"))]
        log::debug!(
            "Built without the parallel feature, ignoring {} requested threads",
            num_threads
        );
    });
}

/// Map `f` over `items`, keeping the input order in the output
pub fn ordered_map<T, R, F>(items: &[T], f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Send + Sync,
{
    #[cfg(feature = "parallel")]
    {
        if items.len() > SEQUENTIAL_CUTOFF {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}

/// Whether any item satisfies `predicate`
pub fn any_match<T, F>(items: &[T], predicate: F) -> bool
where
    T: Sync,
    F: Fn(&T) -> bool + Send + Sync,
{
    #[cfg(feature = "parallel")]
    {
        if items.len() > SEQUENTIAL_CUTOFF {
            return items.par_iter().any(predicate);
        }
    }

    items.iter().any(predicate)
}
