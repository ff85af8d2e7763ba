//! Monthly random events.
//!
//! One event is drawn at the end of every even-numbered turn from a weighted
//! pool: the uneventful outcome carries eight times the weight of each named
//! event. Effects are small fixed deltas applied by exhaustive match.

use coldfront_protocol::BoardState;

use crate::rng::Randomness;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    UneventfulMonth,
    NuclearMeltdown,
    ClumsyCivilServant,
    SoftwareUpdate,
    BankingError,
    Embargoed,
    LaxOpsec,
    PeopleRevolt,
    QuantumBreakthrough,
}

/// The draw pool with weights expanded in place.
pub const EVENT_POOL: [EventKind; 16] = [
    EventKind::UneventfulMonth,
    EventKind::UneventfulMonth,
    EventKind::UneventfulMonth,
    EventKind::UneventfulMonth,
    EventKind::UneventfulMonth,
    EventKind::UneventfulMonth,
    EventKind::UneventfulMonth,
    EventKind::UneventfulMonth,
    EventKind::NuclearMeltdown,
    EventKind::ClumsyCivilServant,
    EventKind::SoftwareUpdate,
    EventKind::BankingError,
    EventKind::Embargoed,
    EventKind::LaxOpsec,
    EventKind::PeopleRevolt,
    EventKind::QuantumBreakthrough,
];

pub fn draw_event(rng: &mut dyn Randomness) -> EventKind {
    EVENT_POOL[rng.pick_index(EVENT_POOL.len())]
}

impl EventKind {
    pub fn description(self) -> &'static str {
        match self {
            EventKind::UneventfulMonth => {
                "Uneventful Month - Nothing out of the ordinary happens this month, continue playing."
            }
            EventKind::NuclearMeltdown => {
                "Nuclear Meltdown - Hinkley Point nuclear generator suffers a small but significant \
                 technical fault. UK Energy loses 1 vitality."
            }
            EventKind::ClumsyCivilServant => {
                "Clumsy Civil Servant - A Civil Servant leaves a laptop with sensitive data on a \
                 train. Electorate loses 1 vitality. UK Government loses 2 resource."
            }
            EventKind::SoftwareUpdate => {
                "Software Update - Government mandates that all companies must have the latest \
                 operating system. UK PLC loses 2 resource."
            }
            EventKind::BankingError => {
                "Banking Error - A rounding error in the Bank of England computer system cripples \
                 transfer protocols. UK cannot transfer any resources this month."
            }
            EventKind::Embargoed => {
                "Embargoed - Russian foreign policy adventurism results in an international arms \
                 embargo. SCS cannot bid on or receive Black Market items this month."
            }
            EventKind::LaxOpsec => {
                "Lax OpSec - An Interior Ministry worker plugs in an unsanitised USB stick. \
                 Russia Government loses 1 vitality and 1 resource."
            }
            EventKind::PeopleRevolt => {
                "People's Revolt - People take to the streets to protest against Internet \
                 censorship. Russia does not gain any resource this month."
            }
            EventKind::QuantumBreakthrough => {
                "Quantum Breakthrough - Google rolls out quantum computing across its services and \
                 devices. ALL entities gain 1 resource and 1 vitality."
            }
        }
    }
}

/// Apply the event's fixed effect and return its narrative description.
pub fn apply_event(board: &mut BoardState, event: EventKind) -> &'static str {
    match event {
        EventKind::UneventfulMonth => {}
        EventKind::NuclearMeltdown => {
            if let Some(energy) = board.blue.entity_mut("energy") {
                energy.vitality -= 1;
            }
        }
        EventKind::ClumsyCivilServant => {
            if let Some(elect) = board.blue.entity_mut("elect") {
                elect.vitality -= 1;
            }
            if let Some(gov) = board.blue.entity_mut("uk_gov") {
                gov.resource -= 2;
            }
        }
        EventKind::SoftwareUpdate => {
            if let Some(plc) = board.blue.entity_mut("plc") {
                plc.resource -= 2;
            }
        }
        EventKind::BankingError => {
            if let Some(gov) = board.blue.entity_mut("uk_gov") {
                gov.traits.banking_error = true;
            }
        }
        EventKind::Embargoed => {
            if let Some(scs) = board.red.entity_mut("scs") {
                scs.traits.embargoed = true;
            }
        }
        EventKind::LaxOpsec => {
            if let Some(gov) = board.red.entity_mut("rus_gov") {
                gov.vitality -= 1;
                gov.resource -= 1;
            }
        }
        EventKind::PeopleRevolt => {
            if let Some(gov) = board.red.entity_mut("rus_gov") {
                gov.traits.people_revolt = true;
            }
        }
        EventKind::QuantumBreakthrough => {
            for entity in board
                .red
                .entities
                .iter_mut()
                .chain(board.blue.entities.iter_mut())
            {
                entity.resource += 1;
                entity.vitality += 1;
            }
        }
    }
    event.description()
}
