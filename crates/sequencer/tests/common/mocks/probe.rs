use masksim_core::circuit::Probe;
use masksim_core::error::SampleError;

/// Probe that counts how many times it was sampled.
#[derive(Debug, Default)]
pub struct CountingProbe {
    pub samples: u64,
}

impl<C> Probe<C> for CountingProbe {
    fn sample(&mut self, _circuit: &C) -> Result<(), SampleError> {
        self.samples += 1;
        Ok(())
    }
}

/// Probe that fails every call after the first `ok_samples` successes.
#[derive(Debug, Default)]
pub struct FlakyProbe {
    pub ok_samples: u64,
    pub calls: u64,
}

impl FlakyProbe {
    pub fn failing_after(ok_samples: u64) -> Self {
        Self {
            ok_samples,
            calls: 0,
        }
    }
}

impl<C> Probe<C> for FlakyProbe {
    fn sample(&mut self, _circuit: &C) -> Result<(), SampleError> {
        self.calls += 1;
        if self.calls > self.ok_samples {
            Err(SampleError::new("trace store full"))
        } else {
            Ok(())
        }
    }
}
