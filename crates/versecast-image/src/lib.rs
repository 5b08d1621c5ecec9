//! # versecast-image
//!
//! Image generation client and job poller for versecast.
//!
//! Generation is asynchronous on the remote side: `submit` returns a job id,
//! and `JobPoller` checks the status endpoint at a fixed interval until the
//! job completes, fails, or the attempt budget runs out. `ImageJobApi` is
//! the seam; `FreepikClient` talks to the real Mystic endpoints and
//! `MockImageJobApi` scripts status sequences for tests.

mod api;
mod freepik;
mod poller;

pub use api::{ImageJob, ImageJobApi, JobStatus, MockImageJobApi};
pub use freepik::FreepikClient;
pub use poller::JobPoller;
