//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the tracker core
//! against mock adapters.  All tests run on the host with no modem or
//! GNSS receiver attached.

mod mock_sink;
mod pipeline_tests;
mod scenario_tests;
