use crate::infra::InMemoryTechnicianDirectory;
use clap::Args;
use fieldops::error::AppError;
use fieldops::ledger::MiningPolicy;
use fieldops::workflows::dispatch::{
    AssignmentOutcome, ComplaintSubmission, DispatchService,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Leading hex zeros required per mined block (lower is faster)
    #[arg(long)]
    pub(crate) difficulty: Option<u32>,
}

fn sample_complaints() -> Vec<ComplaintSubmission> {
    vec![
        ComplaintSubmission {
            submitter_id: 1001,
            problem: "AC not cooling even on full power".to_string(),
            address: "Flat 2B, FC Road, Shivajinagar, Pune".to_string(),
            contact_no: "9822011223".to_string(),
            error_code: Some("E1".to_string()),
            latitude: Some(18.5204),
            longitude: Some(73.8567),
        },
        ComplaintSubmission {
            submitter_id: 1002,
            problem: "Fridge compressor keeps tripping".to_string(),
            address: "Lane 5, Koregaon Park, Pune".to_string(),
            contact_no: "9822044556".to_string(),
            error_code: Some("F0".to_string()),
            latitude: None,
            longitude: None,
        },
        ComplaintSubmission {
            submitter_id: 1003,
            problem: "Unit makes a loud humming noise".to_string(),
            address: "Phase 1, Hinjewadi, Pune".to_string(),
            contact_no: "9822077889".to_string(),
            error_code: Some("NOT_PROVIDED".to_string()),
            latitude: Some(18.5913),
            longitude: Some(73.7389),
        },
    ]
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let mining = MiningPolicy {
        difficulty: args.difficulty.unwrap_or(MiningPolicy::default().difficulty),
        batch_size: 1,
    };

    let directory = Arc::new(InMemoryTechnicianDirectory::seeded());
    let service = DispatchService::new(directory, mining);

    println!("Field Service Dispatch demo");
    println!("===========================");
    println!();

    for submission in sample_complaints() {
        println!("Complaint from {}: {}", submission.contact_no, submission.problem);
        let receipt = service.submit(submission)?;

        match &receipt.outcome {
            AssignmentOutcome::Assigned { technician } => {
                println!(
                    "  -> assigned {} (id {}, {})",
                    technician.name, technician.id, technician.contact_no
                );
            }
            AssignmentOutcome::NoAvailableTechnician => {
                println!("  -> no technician currently available");
            }
            AssignmentOutcome::NoSuitableTechnician => {
                println!("  -> no available technician has the required skills");
            }
        }
        match &receipt.block_hash {
            Some(hash) => println!("  -> ledgered as {} in block {}", receipt.complaint_id, hash),
            None => println!("  -> ledgered as {} (pending batch)", receipt.complaint_id),
        }
        println!();
    }

    let status = service.verify_ledger();
    println!(
        "Chain verification: {} ({} blocks)",
        if status.valid { "ok" } else { "FAILED" },
        status.chain_length
    );
    if let Some(hash) = status.last_block_hash {
        println!("Last block hash: {hash}");
    }

    Ok(())
}
