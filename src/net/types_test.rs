use super::*;

// =============================================================
// SubmissionResult
// =============================================================

#[test]
fn success_reply_decodes() {
    let reply: SubmissionResult =
        serde_json::from_str(r#"{"status":"success","message":"Employee added successfully","action":"continue"}"#)
            .unwrap();
    assert!(reply.is_success());
    assert_eq!(reply.message, "Employee added successfully");
    assert!(reply.errors.is_none());
}

#[test]
fn any_non_success_status_is_failure() {
    let reply: SubmissionResult = serde_json::from_str(r#"{"status":"warning","message":"Hmm"}"#).unwrap();
    assert_eq!(reply.status, SubmissionStatus::Other("warning".to_owned()));
    assert!(!reply.is_success());
}

#[test]
fn missing_status_is_rejected() {
    assert!(serde_json::from_str::<SubmissionResult>(r#"{"message":"OK"}"#).is_err());
}

#[test]
fn missing_message_defaults_to_empty() {
    let reply: SubmissionResult = serde_json::from_str(r#"{"status":"success"}"#).unwrap();
    assert_eq!(reply.message, "");
}

#[test]
fn into_result_carries_validation_errors() {
    let reply: SubmissionResult = serde_json::from_str(
        r#"{"status":"error","message":"Bad","errors":{"name":["This field is required."]}}"#,
    )
    .unwrap();
    let err = reply.into_result().unwrap_err();
    assert_eq!(
        err,
        SubmitError::Business {
            message: "Bad".to_owned(),
            errors: Some(serde_json::json!({"name": ["This field is required."]})),
        }
    );
}

#[test]
fn echoed_record_fields_are_ignored() {
    let reply: SubmissionResult = serde_json::from_str(
        r#"{
            "status": "success",
            "message": "Employee modified successfully",
            "employee": {"id": 7, "name": "Abebe Kebede", "photo_path": null},
            "employee_id": 7
        }"#,
    )
    .unwrap();
    assert!(reply.is_success());
    assert_eq!(reply.message, "Employee modified successfully");
}

// =============================================================
// EmployeesByDutyStation
// =============================================================

#[test]
fn lookup_preserves_server_order() {
    let reply: EmployeesByDutyStation =
        serde_json::from_str(r#"{"employees":[{"id":9,"name":"Zed"},{"id":"3","name":"Amy"}]}"#).unwrap();
    assert_eq!(
        reply.employees,
        vec![
            EmployeeOption { id: "9".to_owned(), name: "Zed".to_owned() },
            EmployeeOption { id: "3".to_owned(), name: "Amy".to_owned() },
        ]
    );
}

#[test]
fn lookup_without_employees_is_empty() {
    let reply: EmployeesByDutyStation = serde_json::from_str("{}").unwrap();
    assert!(reply.employees.is_empty());
}

#[test]
fn lookup_rejects_object_id() {
    assert!(serde_json::from_str::<EmployeesByDutyStation>(r#"{"employees":[{"id":{},"name":"X"}]}"#).is_err());
}
