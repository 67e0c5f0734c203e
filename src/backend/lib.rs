// src/backend/lib.rs

pub mod api;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

use crate::api::*;
use crate::error::StoryError;
use crate::metrics::GetMetricsResponse;
use crate::models::*;

#[ic_cdk::init]
fn init(args: InitArgs) {
    logging::init_logging();
    apply_init_args(args);
    ic_cdk::println!("Story ledger canister initialized.");
}

#[ic_cdk::post_upgrade]
fn post_upgrade(args: Option<InitArgs>) {
    logging::init_logging();
    // Stable structures pick their contents back up on first access.
    match args {
        Some(args) => apply_init_args(args),
        None => ic_cdk::println!("Upgrade without init args, keeping stored configuration."),
    }
    let stories = storage::with_ledger(|ledger| ledger.stories.len());
    ic_cdk::println!("Story ledger canister upgraded, {} stories on record.", stories);
}

fn apply_init_args(args: InitArgs) {
    let result = storage::with_ledger_mut(|ledger| {
        ledger.config.set_admin_principal(args.admin_principal)?;
        ledger
            .config
            .set_min_cycles_threshold(args.min_cycles_threshold)
    });
    match result {
        Ok(()) => ic_cdk::println!(
            "Configuration initialized: Admin={}, Threshold={}",
            args.admin_principal,
            args.min_cycles_threshold
        ),
        Err(e) => ic_cdk::trap(&format!("Failed to apply init args: {}", e)),
    }
}

// Export Candid interface
ic_cdk::export_candid!();
