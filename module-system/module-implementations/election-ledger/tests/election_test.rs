use election_ledger::{
    CallMessage, Candidate, ElectionError, ElectionEvent, QueryMessage, QueryResponse, VoterStatus,
};
use helpers::*;

mod helpers;

#[test]
fn add_candidates_to_fresh_election() {
    let (election, mut working_set) = setup(&[]);

    for name in ["Alice", "Bob"] {
        send(
            &election,
            admin(),
            CallMessage::AddCandidate {
                name: name.to_owned(),
            },
            &mut working_set,
        )
        .unwrap();
    }

    assert_eq!(election.candidates_count(&mut working_set), 2);
    assert_eq!(
        election.get_candidate(0, &mut working_set),
        Ok(Candidate {
            name: "Alice".to_owned(),
            vote_count: 0
        })
    );
    assert_eq!(
        election.get_candidate(2, &mut working_set),
        Err(ElectionError::InvalidCandidate)
    );
}

#[test]
fn two_voters_split_their_votes() {
    let (election, mut working_set) = setup(&["Alice", "Bob"]);

    for i in 1..=2 {
        send(
            &election,
            admin(),
            CallMessage::RegisterVoter(voter(i)),
            &mut working_set,
        )
        .unwrap();
    }
    send(&election, admin(), CallMessage::StartElection, &mut working_set).unwrap();
    send(&election, voter(1), CallMessage::Vote(0), &mut working_set).unwrap();
    send(&election, voter(2), CallMessage::Vote(1), &mut working_set).unwrap();

    assert_eq!(
        election.results(&mut working_set),
        vec![
            Candidate {
                name: "Alice".to_owned(),
                vote_count: 1
            },
            Candidate {
                name: "Bob".to_owned(),
                vote_count: 1
            },
        ]
    );
    assert!(election.has_voter_voted(&voter(1), &mut working_set));
    assert!(election.is_registered_voter(&voter(2), &mut working_set));
    assert!(!election.is_registered_voter(&voter(3), &mut working_set));
}

#[test]
fn non_admin_cannot_configure() {
    let (election, mut working_set) = setup(&["Alice"]);
    let outsider = voter(9);

    for msg in [
        CallMessage::StartElection,
        CallMessage::EndElection,
        CallMessage::AddCandidate {
            name: "Mallory".to_owned(),
        },
        CallMessage::RegisterVoter(outsider),
    ] {
        assert_eq!(
            send(&election, outsider, msg, &mut working_set),
            Err(ElectionError::Unauthorized)
        );
    }

    assert!(!election.election_active(&mut working_set));
    assert_eq!(election.candidates_count(&mut working_set), 1);
    assert!(!election.is_registered_voter(&outsider, &mut working_set));
    assert!(working_set.events().is_empty());
}

#[test]
fn phase_rules() {
    let (election, mut working_set) = setup(&["Alice", "Bob"]);
    send(
        &election,
        admin(),
        CallMessage::RegisterVoter(voter(1)),
        &mut working_set,
    )
    .unwrap();

    assert_eq!(
        send(&election, voter(1), CallMessage::Vote(0), &mut working_set),
        Err(ElectionError::ElectionNotActive)
    );

    send(&election, admin(), CallMessage::StartElection, &mut working_set).unwrap();
    assert_eq!(
        send(&election, admin(), CallMessage::StartElection, &mut working_set),
        Err(ElectionError::AlreadyActive)
    );
    assert_eq!(
        send(
            &election,
            admin(),
            CallMessage::AddCandidate {
                name: "Carol".to_owned()
            },
            &mut working_set
        ),
        Err(ElectionError::ElectionActive)
    );
    assert_eq!(
        send(&election, voter(1), CallMessage::Vote(5), &mut working_set),
        Err(ElectionError::InvalidCandidate)
    );
    assert!(!election.has_voter_voted(&voter(1), &mut working_set));
}

#[test]
fn registration_is_unique() {
    let (election, mut working_set) = setup(&[]);
    send(
        &election,
        admin(),
        CallMessage::RegisterVoter(voter(1)),
        &mut working_set,
    )
    .unwrap();

    assert_eq!(
        send(
            &election,
            admin(),
            CallMessage::RegisterVoter(voter(1)),
            &mut working_set
        ),
        Err(ElectionError::AlreadyRegistered)
    );
    assert_eq!(working_set.take_events().len(), 1);
}

#[test]
fn second_vote_is_rejected() {
    let (election, mut working_set) = setup(&["Alice", "Bob"]);
    send(
        &election,
        admin(),
        CallMessage::RegisterVoter(voter(1)),
        &mut working_set,
    )
    .unwrap();
    send(&election, admin(), CallMessage::StartElection, &mut working_set).unwrap();
    send(&election, voter(1), CallMessage::Vote(0), &mut working_set).unwrap();

    let events_before = working_set.events().len();
    assert_eq!(
        send(&election, voter(1), CallMessage::Vote(1), &mut working_set),
        Err(ElectionError::AlreadyVoted)
    );
    assert_eq!(working_set.events().len(), events_before);
    assert_eq!(
        election
            .results(&mut working_set)
            .iter()
            .map(|candidate| candidate.vote_count)
            .collect::<Vec<_>>(),
        vec![1, 0]
    );
}

#[test]
fn restart_keeps_voters_barred() {
    let (election, mut working_set) = setup(&["Alice"]);
    send(
        &election,
        admin(),
        CallMessage::RegisterVoter(voter(1)),
        &mut working_set,
    )
    .unwrap();
    send(&election, admin(), CallMessage::StartElection, &mut working_set).unwrap();
    send(&election, voter(1), CallMessage::Vote(0), &mut working_set).unwrap();
    send(&election, admin(), CallMessage::EndElection, &mut working_set).unwrap();

    // Candidates can be added again between elections.
    send(
        &election,
        admin(),
        CallMessage::AddCandidate {
            name: "Bob".to_owned(),
        },
        &mut working_set,
    )
    .unwrap();
    send(&election, admin(), CallMessage::StartElection, &mut working_set).unwrap();

    assert_eq!(
        send(&election, voter(1), CallMessage::Vote(1), &mut working_set),
        Err(ElectionError::AlreadyVoted)
    );
    assert_eq!(
        election.get_candidate(0, &mut working_set).unwrap().vote_count,
        1
    );
    assert_eq!(
        election.get_candidate(1, &mut working_set).unwrap().vote_count,
        0
    );
}

#[test]
fn ended_election_event_only_on_phase_change() {
    let (election, mut working_set) = setup(&[]);
    send(&election, admin(), CallMessage::EndElection, &mut working_set).unwrap();
    assert!(working_set.take_events().is_empty());

    send(&election, admin(), CallMessage::StartElection, &mut working_set).unwrap();
    send(&election, admin(), CallMessage::EndElection, &mut working_set).unwrap();
    let events: Vec<ElectionEvent<C>> = working_set
        .take_events()
        .iter()
        .map(|event| event.decode().unwrap())
        .collect();
    assert_eq!(
        events,
        vec![ElectionEvent::ElectionStarted, ElectionEvent::ElectionEnded]
    );
}

#[test]
fn queries() {
    let (election, mut working_set) = setup(&["Alice"]);
    send(
        &election,
        admin(),
        CallMessage::RegisterVoter(voter(1)),
        &mut working_set,
    )
    .unwrap();

    assert_eq!(
        election.query(QueryMessage::Administrator, &mut working_set),
        QueryResponse::Administrator(admin())
    );
    assert_eq!(
        election.query(QueryMessage::CandidatesCount, &mut working_set),
        QueryResponse::CandidatesCount(1)
    );
    assert_eq!(
        election.query(QueryMessage::ElectionActive, &mut working_set),
        QueryResponse::ElectionActive(false)
    );
    assert_eq!(
        election.query(
            QueryMessage::Voter { address: voter(1) },
            &mut working_set
        ),
        QueryResponse::Voter(VoterStatus {
            is_registered: true,
            has_voted: false
        })
    );
    assert_eq!(
        election.query(QueryMessage::Candidate { index: 3 }, &mut working_set),
        QueryResponse::Err(ElectionError::InvalidCandidate.to_string())
    );
}

#[test]
fn call_message_json_matches_schema_names() {
    use ledger_modules_api::ModuleCallJsonSchema;

    let schema = election_ledger::Election::<C>::json_schema();
    for variant in [
        "StartElection",
        "EndElection",
        "AddCandidate",
        "RegisterVoter",
        "Vote",
    ] {
        assert!(schema.contains(variant), "schema is missing {variant}");
    }

    let msg: CallMessage<C> = serde_json::from_str(r#"{"AddCandidate":{"name":"Alice"}}"#).unwrap();
    assert_eq!(
        msg,
        CallMessage::AddCandidate {
            name: "Alice".to_owned()
        }
    );
    let msg: CallMessage<C> = serde_json::from_str(r#""StartElection""#).unwrap();
    assert_eq!(msg, CallMessage::StartElection);
}
