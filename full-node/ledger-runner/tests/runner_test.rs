use election_ledger::{CallMessage, Election, ElectionError, ElectionEvent};
use helpers::*;
use ledger_runner::{LedgerRunner, StorageConfig, TxEffect};
use ledger_state::SnapshotStorage;

mod helpers;

fn in_memory_runner() -> LedgerRunner<Election<C>> {
    LedgerRunner::new(SnapshotStorage::temporary(), Election::<C>::default())
}

#[test]
fn failed_call_is_reverted_and_next_call_applies() {
    let mut runner = in_memory_runner();
    runner
        .init_ledger(&genesis_config(&["Alice", "Bob"], vec![voter(1)]))
        .unwrap();

    let receipt = runner
        .apply_transactions(vec![
            tx(voter(1), CallMessage::StartElection),
            tx(admin(), CallMessage::StartElection),
            tx(voter(1), CallMessage::Vote(9)),
            tx(voter(1), CallMessage::Vote(1)),
        ])
        .unwrap();

    let effects: Vec<TxEffect> = receipt
        .tx_receipts
        .iter()
        .map(|receipt| receipt.receipt.clone())
        .collect();
    assert_eq!(
        effects,
        vec![
            TxEffect::Reverted(ElectionError::Unauthorized.to_string()),
            TxEffect::Successful,
            TxEffect::Reverted(ElectionError::InvalidCandidate.to_string()),
            TxEffect::Successful,
        ]
    );
    assert!(receipt.tx_receipts[0].events.is_empty());
    assert!(receipt.tx_receipts[2].events.is_empty());
    assert_eq!(receipt.successful(), 2);

    let vote_events: Vec<ElectionEvent<C>> = receipt.tx_receipts[3]
        .events
        .iter()
        .map(|event| event.decode().unwrap())
        .collect();
    assert_eq!(
        vote_events,
        vec![ElectionEvent::VoteCast {
            voter: voter(1),
            candidate_index: 1
        }]
    );

    let results = runner.query(|election, working_set| election.results(working_set));
    assert_eq!(results[0].vote_count, 0);
    assert_eq!(results[1].vote_count, 1);
}

#[test]
fn init_ledger_only_once() {
    let mut runner = in_memory_runner();
    assert!(!runner.is_initialized());

    runner.init_ledger(&genesis_config(&[], vec![])).unwrap();
    assert!(runner.is_initialized());
    assert!(runner.init_ledger(&genesis_config(&[], vec![])).is_err());
}

#[test]
fn failed_genesis_commits_nothing() {
    let mut runner = in_memory_runner();

    let err = runner
        .init_ledger(&genesis_config(&[], vec![voter(1), voter(1)]))
        .unwrap_err();
    assert!(format!("{err:#}").contains(&ElectionError::AlreadyRegistered.to_string()));
    assert!(!runner.is_initialized());
}

#[test]
fn state_survives_restart() {
    let tmpdir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        path: Some(tmpdir.path().join("state.json")),
    };

    {
        let mut runner =
            LedgerRunner::from_config(config.clone(), Election::<C>::default()).unwrap();
        runner
            .init_ledger(&genesis_config(&["Alice"], vec![voter(1)]))
            .unwrap();
        runner
            .apply_transactions(vec![
                tx(admin(), CallMessage::StartElection),
                tx(voter(1), CallMessage::Vote(0)),
            ])
            .unwrap();
    }

    let mut runner = LedgerRunner::from_config(config, Election::<C>::default()).unwrap();
    assert!(runner.is_initialized());
    assert!(runner.query(|election, working_set| election.election_active(working_set)));
    assert!(runner.query(|election, working_set| election.has_voter_voted(&voter(1), working_set)));

    let receipt = runner
        .apply_transactions(vec![tx(voter(1), CallMessage::Vote(0))])
        .unwrap();
    assert_eq!(
        receipt.tx_receipts[0].receipt,
        TxEffect::Reverted(ElectionError::AlreadyVoted.to_string())
    );
}

#[test]
fn failed_commit_leaves_no_trace() {
    let tmpdir = tempfile::tempdir().unwrap();
    let path = tmpdir.path().join("snapshot.json");
    let mut runner = LedgerRunner::new(
        SnapshotStorage::with_path(&path).unwrap(),
        Election::<C>::default(),
    );
    runner
        .init_ledger(&genesis_config(&["Alice"], vec![voter(1)]))
        .unwrap();
    runner
        .apply_transactions(vec![tx(admin(), CallMessage::StartElection)])
        .unwrap();

    // The snapshot can no longer be replaced.
    std::fs::remove_file(&path).unwrap();
    std::fs::create_dir(&path).unwrap();

    assert!(runner
        .apply_transactions(vec![tx(voter(1), CallMessage::Vote(0))])
        .is_err());

    let results = runner.query(|election, working_set| election.results(working_set));
    assert_eq!(results[0].vote_count, 0);
    assert!(!runner.query(|election, working_set| election.has_voter_voted(&voter(1), working_set)));

    // Once the snapshot is writable again the same vote goes through.
    std::fs::remove_dir(&path).unwrap();
    let receipt = runner
        .apply_transactions(vec![tx(voter(1), CallMessage::Vote(0))])
        .unwrap();
    assert_eq!(receipt.successful(), 1);
    let reopened = SnapshotStorage::with_path(&path).unwrap();
    let runner = LedgerRunner::new(reopened, Election::<C>::default());
    let results = runner.query(|election, working_set| election.results(working_set));
    assert_eq!(results[0].vote_count, 1);
}

#[test]
fn receipts_serialize_to_json() {
    let mut runner = in_memory_runner();
    runner.init_ledger(&genesis_config(&[], vec![])).unwrap();

    let receipt = runner
        .apply_transactions(vec![tx(admin(), CallMessage::StartElection)])
        .unwrap();

    let json = serde_json::to_string(&receipt).unwrap();
    assert!(json.contains("ElectionStarted"));
    assert!(json.contains("Successful"));
}
