//! Shared test harness modules for the Planeco CLI.

use super::*;

mod helpers;
