// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_actor, create_test_cause, valid_ticket};
use crate::{CheckIn, check_in};
use entrada_domain::TicketStatus;

#[test]
fn test_valid_ticket_is_admitted_and_flipped_to_used() {
    let ticket = valid_ticket();

    let outcome = check_in(&ticket, create_test_actor(), create_test_cause());

    match outcome {
        CheckIn::Admitted {
            ticket: updated,
            audit_event,
        } => {
            assert_eq!(updated.status, TicketStatus::Used);
            assert_eq!(updated.id, ticket.id);
            assert_eq!(audit_event.action.name, "ValidateTicket");
            assert!(audit_event.before.data.contains("status=VALID"));
            assert!(audit_event.after.data.contains("status=USED"));
        }
        CheckIn::AlreadyUsed { .. } => panic!("Expected admission for a VALID ticket"),
    }
}

#[test]
fn test_used_ticket_reports_already_used_without_state_change() {
    let mut ticket = valid_ticket();
    ticket.status = TicketStatus::Used;

    let outcome = check_in(&ticket, create_test_actor(), create_test_cause());

    match outcome {
        CheckIn::AlreadyUsed { ticket: shown } => {
            // The ticket is returned for display, unchanged.
            assert_eq!(shown, ticket);
        }
        CheckIn::Admitted { .. } => panic!("Expected already-used for a USED ticket"),
    }
}

#[test]
fn test_second_check_in_of_admitted_ticket_is_already_used() {
    let ticket = valid_ticket();

    let first = check_in(&ticket, create_test_actor(), create_test_cause());
    let CheckIn::Admitted { ticket: used, .. } = first else {
        panic!("Expected admission");
    };

    let second = check_in(&used, create_test_actor(), create_test_cause());
    assert!(matches!(second, CheckIn::AlreadyUsed { .. }));
}
