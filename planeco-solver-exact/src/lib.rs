//! Exact visiting-order optimiser for Planeco.
//!
//! This crate provides [`ExactOptimizer`], an implementation of the
//! [`OrderOptimizer`](planeco_core::OrderOptimizer) trait that solves the
//! fixed-origin open-path travelling salesman problem by exhaustive search.
//! Every ordering of the following stops is evaluated, so the returned order
//! is always a true optimum.
//!
//! The search is factorial in the number of following stops. Callers bound
//! it through [`PlannerConfig`](planeco_core::PlannerConfig); the default
//! limit of eight stops means at most 40 320 orders per planning cycle.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod permutation;
mod solver;

pub use permutation::next_permutation;
pub use solver::ExactOptimizer;
