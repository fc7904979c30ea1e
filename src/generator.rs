use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, error, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{IdGenError, Result};
use crate::layout::{compose, date_prefix, elapsed_millis, Layout};
use crate::machine_id::{MachineIdResolver, PrivateIpResolver};

pub type MachineIdCheck = Box<dyn Fn(u16) -> bool + Send + Sync>;

/// Construction options for [`Generator`].
///
/// Without a `machine_id` resolver the id is taken from the host's private
/// IPv4 address. `check_machine_id` may reject the resolved id.
#[derive(Default)]
pub struct Options {
    pub machine_id: Option<Box<dyn MachineIdResolver>>,
    pub check_machine_id: Option<MachineIdCheck>,
    pub layout: Layout,
    pub clock: Option<Arc<dyn Clock>>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_machine_id(mut self, resolver: impl MachineIdResolver + 'static) -> Self {
        self.machine_id = Some(Box::new(resolver));
        self
    }

    pub fn with_check_machine_id(
        mut self,
        check: impl Fn(u16) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.check_machine_id = Some(Box::new(check));
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }
}

/// Mints `YYMMDD` + `(machine_id << time_bits | elapsed_ms)` identifiers.
///
/// Safe to share between threads; every call to [`Generator::id`] is
/// serialized by an internal lock. Two calls in the same millisecond return
/// the same id.
pub struct Generator {
    mutex: Mutex<()>,
    machine_id: u16,
    layout: Layout,
    clock: Arc<dyn Clock>,
    spill_reported: AtomicBool,
}

impl Generator {
    /// Returns `None` if the machine id cannot be resolved or is rejected.
    pub fn new(opts: Options) -> Option<Self> {
        match Self::try_new(opts) {
            Ok(generator) => Some(generator),
            Err(e) => {
                error!("Failed to create id generator: {}", e);
                None
            }
        }
    }

    pub fn try_new(opts: Options) -> Result<Self> {
        let machine_id = match &opts.machine_id {
            Some(resolver) => resolver.resolve()?,
            None => PrivateIpResolver.resolve()?,
        };

        if let Some(check) = &opts.check_machine_id {
            if !check(machine_id) {
                return Err(IdGenError::ValidationRejected(machine_id));
            }
        }

        debug!(
            "Id generator ready: machine_id={}, time_bits={}",
            machine_id,
            opts.layout.time_bits()
        );

        Ok(Self {
            mutex: Mutex::new(()),
            machine_id,
            layout: opts.layout,
            clock: opts.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            spill_reported: AtomicBool::new(false),
        })
    }

    pub fn machine_id(&self) -> u16 {
        self.machine_id
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn id(&self) -> Result<i64> {
        let _guard = self.mutex.lock().unwrap_or_else(PoisonError::into_inner);

        let now = self.clock.now();
        let prefix = date_prefix(now.date_naive());
        let elapsed = elapsed_millis(&now);

        if !self.layout.holds(elapsed) && !self.spill_reported.swap(true, Ordering::Relaxed) {
            warn!(
                "Elapsed time {}ms exceeds the {}-bit time field; machine id {} will decode incorrectly",
                elapsed,
                self.layout.time_bits(),
                self.machine_id
            );
        }

        let org_id = self.layout.org_id(self.machine_id, elapsed);
        compose(prefix, org_id)
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("machine_id", &self.machine_id)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}
