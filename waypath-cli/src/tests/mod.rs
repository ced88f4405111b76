//! Shared test harness modules for the Waypath CLI.

use super::*;

mod helpers;
