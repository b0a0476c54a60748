//! # Request Protocol Handler Tests

use super::*;
use crate::domain::*;
use il_01_state_store::{StateKey, StateStore};
use il_02_registry::test_utils::{bootstrap, run, seed_node, seed_service_with_as, NDID_ID};
use il_02_registry::{disable_service, disable_service_destination_by_ndid, ServiceApprovalParams, ServiceIdParams};
use shared_types::{LedgerError, Verdict};

// =============================================================================
// FIXTURES
// =============================================================================

fn make_test_network() -> StateStore {
    let store = bootstrap();
    seed_node(&store, "rp1", "RP", 0.0, 0.0);
    for idp in ["idp1", "idp2", "idp3"] {
        seed_node(&store, idp, "IdP", 3.0, 3.0);
    }
    seed_node(&store, "as1", "AS", 0.0, 0.0);
    seed_node(&store, "as2", "AS", 0.0, 0.0);
    seed_service_with_as(&store, "svc1", "as1");
    seed_service_with_as(&store, "svc1", "as2");
    store.commit().unwrap();
    store
}

fn request_params(request_id: &str, mode: u32, min_idp: u32) -> CreateRequestParams {
    CreateRequestParams {
        request_id: request_id.into(),
        mode,
        min_idp,
        min_ial: 1.1,
        min_aal: 1.0,
        request_timeout: 3600,
        idp_id_list: vec![],
        data_request_list: vec![DataRequestParams {
            service_id: "svc1".into(),
            as_id_list: vec![],
            min_as: 1,
            request_params_hash: "params-hash".into(),
        }],
        request_message_hash: "msg-hash".into(),
        purpose: RequestPurpose::Verification,
    }
}

fn accept(request_id: &str) -> CreateIdpResponseParams {
    CreateIdpResponseParams {
        request_id: request_id.into(),
        ial: 2.3,
        aal: 3.0,
        status: ResponseStatus::Accept,
        signature: "sig".into(),
        identity_proof: "proof".into(),
        private_proof_hash: "pph".into(),
    }
}

fn finish(request_id: &str) -> FinishRequestParams {
    FinishRequestParams {
        request_id: request_id.into(),
        response_valid_list: vec![],
    }
}

fn sign(request_id: &str) -> SignDataParams {
    SignDataParams {
        request_id: request_id.into(),
        service_id: "svc1".into(),
        signature: "as-sig".into(),
    }
}

fn read_request(store: &StateStore, request_id: &str) -> Request {
    run(store, NDID_ID, |ctx| load_request(ctx, request_id)).unwrap()
}

// =============================================================================
// CREATE REQUEST
// =============================================================================

#[test]
fn test_create_request_initializes_empty_lists() {
    let store = make_test_network();
    let id = run(&store, "rp1", |ctx| create_request(ctx, request_params("r1", 1, 2))).unwrap();
    assert_eq!(id, "r1");

    let request = read_request(&store, "r1");
    assert_eq!(request.owner, "rp1");
    assert!(request.response_list.is_empty());
    assert!(request.data_request_list[0].answered_as_id_list.is_empty());
    assert!(!request.can_add_accessor);
    assert_eq!(request.use_count, 0);
}

#[test]
fn test_create_request_by_idp_is_special() {
    let store = make_test_network();
    run(&store, "idp1", |ctx| create_request(ctx, request_params("r1", 3, 1))).unwrap();
    assert!(read_request(&store, "r1").can_add_accessor);
}

#[test]
fn test_create_request_rejects_duplicates() {
    let store = make_test_network();
    run(&store, "rp1", |ctx| create_request(ctx, request_params("r1", 1, 1))).unwrap();
    assert_eq!(
        run(&store, "rp1", |ctx| create_request(ctx, request_params("r1", 1, 1))),
        Err(LedgerError::DuplicateRequestId("r1".into()))
    );

    let mut params = request_params("r2", 1, 1);
    params.data_request_list.push(params.data_request_list[0].clone());
    assert_eq!(
        run(&store, "rp1", |ctx| create_request(ctx, params)),
        Err(LedgerError::DuplicateServiceIdInDataRequest("svc1".into()))
    );
    assert_eq!(
        run(&store, "rp1", |ctx| create_request(ctx, request_params("r3", 7, 1))),
        Err(LedgerError::InvalidMode(7))
    );
}

// =============================================================================
// IDP RESPONSES
// =============================================================================

#[test]
fn test_response_list_never_exceeds_min_idp() {
    let store = make_test_network();
    run(&store, "rp1", |ctx| create_request(ctx, request_params("r1", 1, 2))).unwrap();
    run(&store, "idp1", |ctx| create_idp_response(ctx, accept("r1"))).unwrap();
    run(&store, "idp2", |ctx| create_idp_response(ctx, accept("r1"))).unwrap();

    let third = run(&store, "idp3", |ctx| create_idp_response(ctx, accept("r1")));
    assert_eq!(third, Err(LedgerError::RequestIsCompleted("r1".into())));

    let request = read_request(&store, "r1");
    let order: Vec<&str> = request.response_list.iter().map(|r| r.idp_id.as_str()).collect();
    assert_eq!(order, vec!["idp1", "idp2"]);
}

#[test]
fn test_duplicate_response_from_same_idp() {
    let store = make_test_network();
    run(&store, "rp1", |ctx| create_request(ctx, request_params("r1", 1, 2))).unwrap();
    run(&store, "idp1", |ctx| create_idp_response(ctx, accept("r1"))).unwrap();
    assert_eq!(
        run(&store, "idp1", |ctx| create_idp_response(ctx, accept("r1"))),
        Err(LedgerError::DuplicateResponse("idp1".into()))
    );
}

#[test]
fn test_response_assurance_bounds() {
    let store = make_test_network();
    run(&store, "rp1", |ctx| create_request(ctx, request_params("r1", 1, 2))).unwrap();

    let mut low_ial = accept("r1");
    low_ial.ial = 1.0;
    assert!(matches!(
        run(&store, "idp1", |ctx| create_idp_response(ctx, low_ial)),
        Err(LedgerError::IalError(_))
    ));

    let mut low_aal = accept("r1");
    low_aal.aal = 0.5;
    assert!(matches!(
        run(&store, "idp1", |ctx| create_idp_response(ctx, low_aal)),
        Err(LedgerError::AalError(_))
    ));

    let mut above_max = accept("r1");
    above_max.ial = 3.5;
    assert!(matches!(
        run(&store, "idp1", |ctx| create_idp_response(ctx, above_max)),
        Err(LedgerError::IalError(_))
    ));
}

#[test]
fn test_response_must_come_from_listed_idp() {
    let store = make_test_network();
    let mut params = request_params("r1", 1, 1);
    params.idp_id_list = vec!["idp2".into()];
    run(&store, "rp1", |ctx| create_request(ctx, params)).unwrap();

    assert_eq!(
        run(&store, "idp1", |ctx| create_idp_response(ctx, accept("r1"))),
        Err(LedgerError::NotInIdpList("idp1".into()))
    );
    run(&store, "idp2", |ctx| create_idp_response(ctx, accept("r1"))).unwrap();
}

#[test]
fn test_mode_three_needs_matching_proof() {
    let store = make_test_network();
    run(&store, "rp1", |ctx| create_request(ctx, request_params("r1", 3, 2))).unwrap();

    assert_eq!(
        run(&store, "idp1", |ctx| create_idp_response(ctx, accept("r1"))),
        Err(LedgerError::WrongIdentityProof("idp1".into()))
    );

    let declare = |proof: &str| DeclareIdentityProofParams {
        request_id: "r1".into(),
        identity_proof: proof.into(),
    };
    run(&store, "idp1", |ctx| declare_identity_proof(ctx, declare("other"))).unwrap();
    assert_eq!(
        run(&store, "idp1", |ctx| create_idp_response(ctx, accept("r1"))),
        Err(LedgerError::WrongIdentityProof("idp1".into()))
    );
    assert_eq!(
        run(&store, "idp1", |ctx| declare_identity_proof(ctx, declare("proof"))),
        Err(LedgerError::DuplicateIdentityProof {
            request_id: "r1".into(),
            idp_id: "idp1".into()
        })
    );

    run(&store, "idp2", |ctx| declare_identity_proof(ctx, declare("proof"))).unwrap();
    run(&store, "idp2", |ctx| create_idp_response(ctx, accept("r1"))).unwrap();
}

#[test]
fn test_declare_proof_only_for_mode_three() {
    let store = make_test_network();
    run(&store, "rp1", |ctx| create_request(ctx, request_params("r1", 1, 1))).unwrap();
    let result = run(&store, "idp1", |ctx| {
        declare_identity_proof(
            ctx,
            DeclareIdentityProofParams {
                request_id: "r1".into(),
                identity_proof: "p".into(),
            },
        )
    });
    assert_eq!(result, Err(LedgerError::InvalidMode(1)));
}

// =============================================================================
// TERMINAL STATES
// =============================================================================

#[test]
fn test_terminal_request_rejects_everything() {
    let store = make_test_network();
    run(&store, "rp1", |ctx| {
        create_request(ctx, request_params("closed", 1, 2))?;
        create_request(ctx, request_params("expired", 1, 2))
    })
    .unwrap();
    run(&store, "rp1", |ctx| close_request(ctx, finish("closed"))).unwrap();
    run(&store, "rp1", |ctx| timeout_request(ctx, finish("expired"))).unwrap();

    for (id, expected) in [
        ("closed", LedgerError::RequestIsClosed("closed".into())),
        ("expired", LedgerError::RequestIsTimedOut("expired".into())),
    ] {
        assert_eq!(
            run(&store, "idp1", |ctx| create_idp_response(ctx, accept(id))),
            Err(expected.clone())
        );
        assert_eq!(run(&store, "as1", |ctx| sign_data(ctx, sign(id))), Err(expected.clone()));
        assert!(run(&store, "rp1", |ctx| close_request(ctx, finish(id))).is_err());
        assert!(run(&store, "rp1", |ctx| timeout_request(ctx, finish(id))).is_err());
    }

    let closed = read_request(&store, "closed");
    assert!(closed.closed && !closed.timed_out);
    let expired = read_request(&store, "expired");
    assert!(expired.timed_out && !expired.closed);
}

#[test]
fn test_only_owner_may_close() {
    let store = make_test_network();
    run(&store, "rp1", |ctx| create_request(ctx, request_params("r1", 1, 1))).unwrap();
    assert_eq!(
        run(&store, "idp1", |ctx| close_request(ctx, finish("r1"))),
        Err(LedgerError::NotRequestOwner {
            request_id: "r1".into(),
            node_id: "idp1".into()
        })
    );
}

#[test]
fn test_close_applies_verdicts_per_idp() {
    let store = make_test_network();
    run(&store, "rp1", |ctx| create_request(ctx, request_params("r1", 1, 2))).unwrap();
    run(&store, "idp1", |ctx| create_idp_response(ctx, accept("r1"))).unwrap();
    run(&store, "idp2", |ctx| create_idp_response(ctx, accept("r1"))).unwrap();

    let params = FinishRequestParams {
        request_id: "r1".into(),
        response_valid_list: vec![
            ResponseValid {
                idp_id: "idp2".into(),
                valid_proof: Verdict::Valid,
                valid_ial: Verdict::Invalid,
                valid_signature: Verdict::Valid,
            },
            ResponseValid {
                idp_id: "nobody".into(),
                valid_proof: Verdict::Valid,
                valid_ial: Verdict::Valid,
                valid_signature: Verdict::Valid,
            },
        ],
    };
    run(&store, "rp1", |ctx| close_request(ctx, params)).unwrap();

    let request = read_request(&store, "r1");
    assert_eq!(request.response_list[0].valid_proof, Verdict::Unset);
    assert_eq!(request.response_list[1].valid_proof, Verdict::Valid);
    assert_eq!(request.response_list[1].valid_ial, Verdict::Invalid);
    assert_eq!(request.valid_accepts().count(), 0);
}

// =============================================================================
// AS DATA FLOW
// =============================================================================

#[test]
fn test_sign_data_once_per_as() {
    let store = make_test_network();
    let mut params = request_params("r1", 1, 1);
    params.data_request_list[0].min_as = 2;
    run(&store, "rp1", |ctx| create_request(ctx, params)).unwrap();

    run(&store, "as1", |ctx| sign_data(ctx, sign("r1"))).unwrap();
    assert_eq!(
        run(&store, "as1", |ctx| sign_data(ctx, sign("r1"))),
        Err(LedgerError::DuplicateAnsweredAsIdList("as1".into()))
    );

    run(&store, "as2", |ctx| {
        let signed: Option<SignedData> = ctx.get(&StateKey::sign_data("as1", "svc1", "r1"))?;
        assert_eq!(signed.unwrap().signature, "as-sig");
        Ok(())
    })
    .unwrap();
}

#[test]
fn test_sign_data_stops_at_min_as() {
    let store = make_test_network();
    run(&store, "rp1", |ctx| create_request(ctx, request_params("r1", 1, 1))).unwrap();
    run(&store, "as1", |ctx| sign_data(ctx, sign("r1"))).unwrap();
    assert_eq!(
        run(&store, "as2", |ctx| sign_data(ctx, sign("r1"))),
        Err(LedgerError::DataRequestIsCompleted("svc1".into()))
    );
}

#[test]
fn test_sign_data_respects_as_list_and_approval() {
    let store = make_test_network();
    let mut params = request_params("r1", 1, 1);
    params.data_request_list[0].as_id_list = vec!["as2".into()];
    run(&store, "rp1", |ctx| create_request(ctx, params)).unwrap();

    assert_eq!(
        run(&store, "as1", |ctx| sign_data(ctx, sign("r1"))),
        Err(LedgerError::NodeIdIsNotExistInAsList("as1".into()))
    );

    run(&store, NDID_ID, |ctx| {
        disable_service_destination_by_ndid(
            ctx,
            ServiceApprovalParams {
                service_id: "svc1".into(),
                node_id: "as2".into(),
            },
        )
    })
    .unwrap();
    assert_eq!(
        run(&store, "as2", |ctx| sign_data(ctx, sign("r1"))),
        Err(LedgerError::ServiceDestinationIsNotApproved {
            service_id: "svc1".into(),
            node_id: "as2".into()
        })
    );
}

#[test]
fn test_sign_data_on_inactive_service() {
    let store = make_test_network();
    run(&store, "rp1", |ctx| create_request(ctx, request_params("r1", 1, 1))).unwrap();
    run(&store, NDID_ID, |ctx| {
        disable_service(ctx, ServiceIdParams { service_id: "svc1".into() })
    })
    .unwrap();
    assert_eq!(
        run(&store, "as1", |ctx| sign_data(ctx, sign("r1"))),
        Err(LedgerError::ServiceIsNotActive("svc1".into()))
    );
}

#[test]
fn test_data_received_after_answer_only() {
    let store = make_test_network();
    run(&store, "rp1", |ctx| create_request(ctx, request_params("r1", 1, 1))).unwrap();

    let received = |as_id: &str| SetDataReceivedParams {
        request_id: "r1".into(),
        service_id: "svc1".into(),
        as_id: as_id.into(),
    };
    assert_eq!(
        run(&store, "rp1", |ctx| set_data_received(ctx, received("as1"))),
        Err(LedgerError::AsIdIsNotExistInAnsweredAsList("as1".into()))
    );

    run(&store, "as1", |ctx| sign_data(ctx, sign("r1"))).unwrap();
    run(&store, "rp1", |ctx| set_data_received(ctx, received("as1"))).unwrap();
    assert_eq!(
        run(&store, "rp1", |ctx| set_data_received(ctx, received("as1"))),
        Err(LedgerError::DuplicateAsInDataRequest("as1".into()))
    );
    assert!(matches!(
        run(&store, "idp1", |ctx| set_data_received(ctx, received("as1"))),
        Err(LedgerError::NotRequestOwner { .. })
    ));

    let request = read_request(&store, "r1");
    assert_eq!(request.data_request_list[0].received_data_from_list, vec!["as1".to_string()]);
}

#[test]
fn test_data_lists_keep_arrival_order() {
    let store = make_test_network();
    let mut params = request_params("r1", 1, 1);
    params.data_request_list[0].min_as = 2;
    run(&store, "rp1", |ctx| create_request(ctx, params)).unwrap();

    run(&store, "as2", |ctx| sign_data(ctx, sign("r1"))).unwrap();
    run(&store, "as1", |ctx| sign_data(ctx, sign("r1"))).unwrap();

    let received = |as_id: &str| SetDataReceivedParams {
        request_id: "r1".into(),
        service_id: "svc1".into(),
        as_id: as_id.into(),
    };
    run(&store, "rp1", |ctx| set_data_received(ctx, received("as1"))).unwrap();
    run(&store, "rp1", |ctx| set_data_received(ctx, received("as2"))).unwrap();

    let data_request = &read_request(&store, "r1").data_request_list[0];
    assert_eq!(data_request.answered_as_id_list, vec!["as2".to_string(), "as1".to_string()]);
    assert_eq!(data_request.received_data_from_list, vec!["as1".to_string(), "as2".to_string()]);
}
