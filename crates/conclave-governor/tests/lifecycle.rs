//! End-to-end governance lifecycle over a concrete governed target.

use std::collections::HashMap;

use conclave_governor::{
    bind_governor, GovernanceEvent, Governor, GovernorConfig, GovernorError, ProposalState,
    VoteSupport,
};
use conclave_ledger::VotingLedger;
use conclave_timelock::{Dispatcher, Role, Timelock, TimelockError};
use conclave_types::{Address, CallAction, ProposalId};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_test_writer()
        .try_init();
}

fn addr(n: u8) -> Address {
    let mut bytes = [0u8; 20];
    bytes[19] = n;
    Address::from_bytes(bytes)
}

const DEPLOYER: u8 = 9;
const GOVERNOR: u8 = 10;
const GATE: u8 = 11;
const STORE: u8 = 20;
const ALICE: u8 = 1;
const BOB: u8 = 2;
const CAROL: u8 = 3;

/// A governed key-value store: `data[0]` is the key, the rest the value.
struct KvStore {
    address: Address,
    entries: HashMap<u8, Vec<u8>>,
}

impl KvStore {
    fn new(address: Address) -> Self {
        Self {
            address,
            entries: HashMap::new(),
        }
    }
}

impl Dispatcher for KvStore {
    fn dispatch(&mut self, action: &CallAction) -> Result<Vec<u8>, String> {
        if action.target != self.address {
            return Err(format!("unknown target {}", action.target));
        }
        let (key, value) = action
            .data
            .split_first()
            .ok_or_else(|| "empty payload".to_string())?;
        self.entries.insert(*key, value.to_vec());
        Ok(vec![])
    }
}

struct World {
    ledger: VotingLedger,
    governor: Governor,
    timelock: Timelock,
    store: KvStore,
}

/// Three holders (1000/500/300) self-delegated at block 1, governor bound
/// to a gate with a 100-unit minimum delay.
fn setup() -> World {
    init_tracing();

    let mut timelock = Timelock::new(addr(GATE), 100, addr(DEPLOYER));
    bind_governor(&mut timelock, addr(DEPLOYER), addr(GOVERNOR)).expect("binding");

    let mut ledger = VotingLedger::new();
    for (holder, amount) in [(ALICE, 1000u128), (BOB, 500), (CAROL, 300)] {
        ledger.mint(addr(holder), amount, 1).expect("mint");
        ledger.delegate(addr(holder), addr(holder), 1);
    }

    let config = GovernorConfig {
        voting_delay: 2,
        voting_period: 10,
        proposal_threshold: 100,
        quorum_bps: 2000, // 20% of 1800 = 360
        queue_window: 20,
        execution_grace: 1000,
    };

    World {
        ledger,
        governor: Governor::new(addr(GOVERNOR), config),
        timelock,
        store: KvStore::new(addr(STORE)),
    }
}

fn set_key(key: u8, value: &[u8]) -> CallAction {
    let mut data = vec![key];
    data.extend_from_slice(value);
    CallAction::new(addr(STORE), 0, data)
}

#[test]
fn test_full_lifecycle_propose_vote_queue_execute() {
    let mut world = setup();
    let actions = vec![set_key(1, b"alpha"), set_key(2, b"beta")];

    // Propose at block 50: vote_start 52, vote_end 62, snapshot 51.
    let id = world
        .governor
        .propose(&world.ledger, addr(ALICE), actions, "write two keys", 50)
        .expect("propose");

    let state = |w: &World, block, ts| {
        w.governor
            .state(&w.ledger, &w.timelock, &id, block, ts)
            .expect("state")
    };
    assert_eq!(state(&world, 51, 0), ProposalState::Pending);

    // Alice for, Bob against, Carol abstains: 1000 > 500, total 1800 >= 360.
    world
        .governor
        .cast_vote(&world.ledger, addr(ALICE), &id, VoteSupport::For, 52)
        .expect("vote");
    world
        .governor
        .cast_vote(&world.ledger, addr(BOB), &id, VoteSupport::Against, 55)
        .expect("vote");
    world
        .governor
        .cast_vote(&world.ledger, addr(CAROL), &id, VoteSupport::Abstain, 60)
        .expect("vote");
    assert_eq!(world.governor.proposal_votes(&id).expect("votes"), (500, 1000, 300));

    assert_eq!(state(&world, 63, 0), ProposalState::Succeeded);

    // Queue at t=5000: both operations ready at 5100.
    let ready_at = world
        .governor
        .queue(&world.ledger, &mut world.timelock, &id, 63, 5000)
        .expect("queue");
    assert_eq!(ready_at, 5100);
    assert_eq!(state(&world, 63, 5000), ProposalState::Queued);

    // Too early by one tick.
    let result = world.governor.execute(
        &world.ledger,
        &mut world.timelock,
        addr(42),
        &id,
        63,
        5099,
        &mut world.store,
    );
    assert!(matches!(
        result,
        Err(GovernorError::Timelock(TimelockError::NotReady { ready_at: 5100, now: 5099 }))
    ));
    assert!(world.store.entries.is_empty());

    // Anyone can execute once ready.
    world
        .governor
        .execute(
            &world.ledger,
            &mut world.timelock,
            addr(42),
            &id,
            63,
            5100,
            &mut world.store,
        )
        .expect("execute");

    assert_eq!(world.store.entries.get(&1).map(Vec::as_slice), Some(b"alpha".as_ref()));
    assert_eq!(world.store.entries.get(&2).map(Vec::as_slice), Some(b"beta".as_ref()));
    assert_eq!(state(&world, 64, 5101), ProposalState::Executed);

    let events = world.governor.drain_events();
    assert!(matches!(
        events.first(),
        Some(GovernanceEvent::ProposalCreated { snapshot: 51, vote_start: 52, vote_end: 62, .. })
    ));
    assert!(matches!(events.last(), Some(GovernanceEvent::ProposalExecuted { id: eid }) if *eid == id));
}

#[test]
fn test_token_moves_after_snapshot_do_not_count() {
    let mut world = setup();

    let id = world
        .governor
        .propose(&world.ledger, addr(ALICE), vec![set_key(7, b"x")], "snapshot test", 50)
        .expect("propose");

    // After the snapshot (block 51) Alice hands everything to Bob.
    world
        .ledger
        .transfer(addr(ALICE), addr(BOB), 1000, 52)
        .expect("transfer");

    // Bob's weight is still his snapshot 500, Alice's still 1000.
    let weight = world
        .governor
        .cast_vote(&world.ledger, addr(BOB), &id, VoteSupport::Against, 53)
        .expect("vote");
    assert_eq!(weight, 500);
    let weight = world
        .governor
        .cast_vote(&world.ledger, addr(ALICE), &id, VoteSupport::For, 53)
        .expect("vote");
    assert_eq!(weight, 1000);

    let state = world
        .governor
        .state(&world.ledger, &world.timelock, &id, 63, 0)
        .expect("state");
    assert_eq!(state, ProposalState::Succeeded);
}

#[test]
fn test_delegated_power_votes_once() {
    let mut world = setup();

    // Carol delegates to Bob before the snapshot: Bob wields 800, Carol 0.
    world.ledger.delegate(addr(CAROL), addr(BOB), 40);

    let id = world
        .governor
        .propose(&world.ledger, addr(ALICE), vec![set_key(3, b"y")], "delegation test", 50)
        .expect("propose");

    let weight = world
        .governor
        .cast_vote(&world.ledger, addr(BOB), &id, VoteSupport::For, 53)
        .expect("vote");
    assert_eq!(weight, 800);

    let weight = world
        .governor
        .cast_vote(&world.ledger, addr(CAROL), &id, VoteSupport::For, 53)
        .expect("vote");
    assert_eq!(weight, 0);
}

#[test]
fn test_defeated_proposal_cannot_be_queued() {
    let mut world = setup();

    let id = world
        .governor
        .propose(&world.ledger, addr(ALICE), vec![set_key(4, b"z")], "doomed", 50)
        .expect("propose");

    world
        .governor
        .cast_vote(&world.ledger, addr(ALICE), &id, VoteSupport::Against, 53)
        .expect("vote");

    let result = world
        .governor
        .queue(&world.ledger, &mut world.timelock, &id, 63, 5000);
    assert!(matches!(
        result,
        Err(GovernorError::InvalidState { actual: ProposalState::Defeated, .. })
    ));
}

#[test]
fn test_duplicate_content_requires_distinct_description() {
    let mut world = setup();
    let actions = vec![set_key(5, b"v")];

    world
        .governor
        .propose(&world.ledger, addr(ALICE), actions.clone(), "same words", 50)
        .expect("propose");

    let result = world
        .governor
        .propose(&world.ledger, addr(BOB), actions.clone(), "same words", 51);
    assert!(matches!(result, Err(GovernorError::DuplicateProposal(_))));

    // A different description yields a different fingerprint.
    world
        .governor
        .propose(&world.ledger, addr(BOB), actions, "different words", 51)
        .expect("propose");
}

#[test]
fn test_queries_on_missing_proposal() {
    let world = setup();
    let missing = ProposalId::ZERO;

    assert!(matches!(
        world
            .governor
            .state(&world.ledger, &world.timelock, &missing, 1, 0),
        Err(GovernorError::ProposalNotFound(_))
    ));
    assert!(matches!(
        world.governor.proposal_deadline(&missing),
        Err(GovernorError::ProposalNotFound(_))
    ));
}

/// A deferred self-call against the gate: the proposal's action targets the
/// gate itself, and applying it uses the gate's own identity as caller.
struct GateCallRecorder {
    gate: Address,
    pending: Vec<(Role, Address)>,
}

impl Dispatcher for GateCallRecorder {
    fn dispatch(&mut self, action: &CallAction) -> Result<Vec<u8>, String> {
        if action.target != self.gate {
            return Err(format!("unknown target {}", action.target));
        }
        let (role_code, account_bytes) = action
            .data
            .split_first()
            .ok_or_else(|| "empty payload".to_string())?;
        let role = match role_code {
            0 => Role::Admin,
            1 => Role::Proposer,
            2 => Role::Executor,
            _ => return Err("unknown role".to_string()),
        };
        let bytes: [u8; 20] = account_bytes
            .try_into()
            .map_err(|_| "bad address".to_string())?;
        self.pending.push((role, Address::from_bytes(bytes)));
        Ok(vec![])
    }
}

#[test]
fn test_closed_loop_role_administration() {
    let mut world = setup();
    let new_proposer = addr(30);

    // Encode "grant Proposer to new_proposer" as a call against the gate.
    let mut data = vec![1u8];
    data.extend_from_slice(new_proposer.as_bytes());
    let grant_action = CallAction::new(addr(GATE), 0, data);

    let id = world
        .governor
        .propose(
            &world.ledger,
            addr(ALICE),
            vec![grant_action],
            "add a second proposer",
            50,
        )
        .expect("propose");
    world
        .governor
        .cast_vote(&world.ledger, addr(ALICE), &id, VoteSupport::For, 53)
        .expect("vote");
    world
        .governor
        .queue(&world.ledger, &mut world.timelock, &id, 63, 5000)
        .expect("queue");

    let mut recorder = GateCallRecorder {
        gate: addr(GATE),
        pending: Vec::new(),
    };
    world
        .governor
        .execute(
            &world.ledger,
            &mut world.timelock,
            addr(42),
            &id,
            63,
            5100,
            &mut recorder,
        )
        .expect("execute");

    // Apply the recorded self-call with the gate's own identity: the gate
    // holds its own admin grant, so the change goes through, while no
    // external account could make it directly.
    let gate_addr = world.timelock.address();
    for (role, account) in recorder.pending {
        world
            .timelock
            .grant_role(gate_addr, role, account)
            .expect("self-administered grant");
    }
    assert!(world.timelock.has_role(Role::Proposer, &new_proposer));

    let result = world
        .timelock
        .grant_role(addr(ALICE), Role::Proposer, addr(31));
    assert!(matches!(result, Err(TimelockError::Unauthorized { .. })));
}
