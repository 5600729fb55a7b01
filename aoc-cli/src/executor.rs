//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::inputs::InputStore;
use aoc_solver::{DynSolver, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;

/// Outcome of one (year, day, part)
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, ArcExecutorError>,
    /// Parse time, reported once per parse
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

/// Work item representing a solver to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Read-only state every worker needs
struct Shared {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
}

/// Runs filtered solvers on a dedicated rayon pool
pub struct Executor {
    shared: Shared,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
    thread_pool: rayon::ThreadPool,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            shared: Shared {
                registry,
                inputs: config.input_store(),
                parallelize_by: config.parallelize_by,
            },
            year_filter: config.year_filter,
            day_filter: config.day_filter,
            part_filter: config.part_filter,
            thread_pool,
        })
    }

    pub fn inputs(&self) -> &InputStore {
        &self.shared.inputs
    }

    /// Collect work items by filtering from registry metadata, in
    /// (year, day) order
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        self.shared
            .registry
            .storage()
            .iter_info()
            .filter(|info| self.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| self.day_filter.is_none_or(|d| info.day == d))
            .filter_map(|info| {
                let parts = select_parts(self.part_filter, info.parts)?;
                Some(WorkItem {
                    year: info.year,
                    day: info.day,
                    parts,
                })
            })
            .collect()
    }

    /// Execute all work items, streaming one result per part into `tx`
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        log::info!(
            "executing {} puzzle(s) by {:?} on {} thread(s)",
            work_items.len(),
            self.shared.parallelize_by,
            self.thread_pool.current_num_threads()
        );

        match self.shared.parallelize_by {
            ParallelizeBy::Sequential => run_group(work_items, &tx, &self.shared).map_or(Ok(()), Err),
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();
                self.execute_parallel(by_year, &tx)
            }
            ParallelizeBy::Day | ParallelizeBy::Part => {
                let singles = work_items.into_iter().map(|w| vec![w]).collect();
                self.execute_parallel(singles, &tx)
            }
        }
    }

    /// Run each group as one pool task, merging every group's error
    fn execute_parallel(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let shared = &self.shared;
        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map_with(tx.clone(), |tx, items| run_group(items, tx, shared))
                .reduce(
                    || None,
                    |a, b| match (a, b) {
                        (Some(a), Some(b)) => Some(ArcExecutorError::combine(a, b)),
                        (a, b) => a.or(b),
                    },
                )
                .map_or(Ok(()), Err)
        })
    }
}

/// Parts of a solver with `max_parts` parts selected by `filter`
fn select_parts(filter: Option<u8>, max_parts: u8) -> Option<RangeInclusive<u8>> {
    match filter {
        Some(p) if (1..=max_parts).contains(&p) => Some(p..=p),
        Some(_) => None,
        None if max_parts > 0 => Some(1..=max_parts),
        None => None,
    }
}

/// Run work items in order, collecting their errors
fn run_group(
    items: Vec<WorkItem>,
    tx: &Sender<SolverResult>,
    shared: &Shared,
) -> Option<ArcExecutorError> {
    let mut collected: Option<ArcExecutorError> = None;
    for work in items {
        if let Err(e) = run_work(&work, tx, shared) {
            collected = Some(ArcExecutorError::combine_opt(collected, e));
        }
    }
    collected
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Report `error` as the answer of every part of `work`
fn send_failure(
    work: &WorkItem,
    error: ArcExecutorError,
    tx: &Sender<SolverResult>,
) -> Result<(), ArcExecutorError> {
    log::warn!("{}/{:02}: {error}", work.year, work.day);
    for part in work.parts.clone() {
        send(tx, failed_result(work.year, work.day, part, error.clone()))?;
    }
    Ok(())
}

fn failed_result(year: u16, day: u8, part: u8, error: ArcExecutorError) -> SolverResult {
    SolverResult {
        year,
        day,
        part,
        answer: Err(error),
        parse_duration: None,
        solve_duration: TimeDelta::zero(),
    }
}

/// Load the input of one puzzle and solve its selected parts.
///
/// Input, parse and solve failures become error results; only a closed
/// result channel is an error of the executor itself.
fn run_work(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    shared: &Shared,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    let input = match shared.inputs.read(year, day) {
        Ok(input) => input,
        Err(source) => {
            let error = ExecutorError::Input { year, day, source };
            return send_failure(work, error.into(), tx);
        }
    };

    if shared.parallelize_by == ParallelizeBy::Part {
        // Every part parses its own copy of the shared data
        work.parts
            .clone()
            .into_par_iter()
            .try_for_each_with(tx.clone(), |tx, part| {
                let single = WorkItem {
                    year,
                    day,
                    parts: part..=part,
                };
                solve_parts(&single, &input, tx, &shared.registry)
            })
    } else {
        solve_parts(work, &input, tx, &shared.registry)
    }
}

/// Parse once, then solve each part of `work` in order
fn solve_parts(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let mut solver = match registry.create_solver(work.year, work.day, input) {
        Ok(solver) => solver,
        Err(e) => return send_failure(work, ExecutorError::Solver(e).into(), tx),
    };

    let mut parse_duration = Some(solver.parse_duration());
    for part in work.parts.clone() {
        let mut result = solve_part(work.year, work.day, part, &mut *solver);
        result.parse_duration = parse_duration.take();
        send(tx, result)?;
    }
    Ok(())
}

fn solve_part(year: u16, day: u8, part: u8, solver: &mut dyn DynSolver) -> SolverResult {
    match solver.solve(part) {
        Ok(solved) => SolverResult {
            year,
            day,
            part,
            solve_duration: solved.duration(),
            answer: Ok(solved.answer),
            parse_duration: None,
        },
        Err(e) => {
            let error: ArcExecutorError = ExecutorError::Solver(e.into()).into();
            log::warn!("{year}/{day:02} part {part}: {error}");
            failed_result(year, day, part, error)
        }
    }
}
