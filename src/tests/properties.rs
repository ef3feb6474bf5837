use serde_json::{Value, json};
use yare::parameterized;

use crate::{Policy, PolicyError, canonicalize_document, canonicalize_policy};

fn canonical(document: Value) -> Policy {
    canonicalize_document(&document).unwrap()
}

fn statement(body: Value) -> Policy {
    canonical(json!({"Version": "2012-10-17", "Statement": body}))
}

const KITCHEN_SINK: &str = r#"{
    "Id": "S3-Cross-Account",
    "Version": "2012-10-17",
    "Statement": [
        {
            "Sid": "CrossAccountRead",
            "Effect": "Allow",
            "Principal": {"AWS": ["arn:aws:iam::444455556666:root", "111122223333"], "Service": "cloudtrail.amazonaws.com"},
            "Action": ["S3:GetObject", "s3:ListBucket", "s3:getobject"],
            "Resource": ["arn:aws:s3:::Example/*", "arn:aws:s3:::Example"],
            "Condition": {
                "StringEquals": {"AWS:SourceAccount": ["123", 456, "123"]},
                "Bool": {"aws:SecureTransport": true}
            }
        },
        {
            "Sid": "DenyEverythingElse",
            "Effect": "Deny",
            "NotPrincipal": "*",
            "NotAction": "s3:*",
            "NotResource": "arn:aws:s3:::Example/*"
        }
    ]
}"#;

#[test]
fn test_canonicalization_is_idempotent() {
    let first = canonicalize_policy(KITCHEN_SINK).unwrap();
    let serialized = serde_json::to_string(&first).unwrap();
    let second = canonicalize_policy(&serialized).unwrap();

    assert_eq!(first, second);
    assert_eq!(serialized, serde_json::to_string(&second).unwrap());
}

#[test]
fn test_display_output_is_a_fixed_point() {
    let first = canonicalize_policy(KITCHEN_SINK).unwrap();
    let second: Policy = first.to_string().parse().unwrap();
    assert_eq!(first.to_string(), second.to_string());
}

#[parameterized(
    action_permutation = {
        json!({"Effect": "Allow", "Action": ["s3:PutObject", "s3:GetObject", "ec2:RunInstances"]}),
        json!({"Effect": "Allow", "Action": ["ec2:RunInstances", "s3:GetObject", "s3:PutObject"]}),
    },
    resource_permutation = {
        json!({"Effect": "Allow", "Resource": ["arn:aws:s3:::b", "arn:aws:s3:::a/*", "arn:aws:s3:::a"]}),
        json!({"Effect": "Allow", "Resource": ["arn:aws:s3:::a", "arn:aws:s3:::b", "arn:aws:s3:::a/*"]}),
    },
    principal_permutation = {
        json!({"Effect": "Allow", "Principal": {"AWS": ["222233334444", "111122223333"]}}),
        json!({"Effect": "Allow", "Principal": {"AWS": ["111122223333", "222233334444"]}}),
    },
    action_case = {
        json!({"Effect": "Allow", "Action": ["S3:GetObject"]}),
        json!({"Effect": "Allow", "Action": ["s3:getobject"]}),
    },
    action_duplicates = {
        json!({"Effect": "Allow", "Action": ["s3:GetObject", "s3:getobject", "s3:GetObject"]}),
        json!({"Effect": "Allow", "Action": "s3:getobject"}),
    },
    principal_wildcard = {
        json!({"Effect": "Allow", "Principal": "*"}),
        json!({"Effect": "Allow", "Principal": {"AWS": "*"}}),
    },
    resource_scalar = {
        json!({"Effect": "Allow", "Resource": "arn:aws:s3:::b/*"}),
        json!({"Effect": "Allow", "Resource": ["arn:aws:s3:::b/*"]}),
    },
    condition_key_case = {
        json!({"Effect": "Allow", "Condition": {"StringEquals": {"AWS:SourceAccount": "123"}}}),
        json!({"Effect": "Allow", "Condition": {"StringEquals": {"aws:sourceaccount": ["123"]}}}),
    },
    condition_whole_floats = {
        json!({"Effect": "Allow", "Condition": {"NumericEquals": {"s3:max-keys": 1}}}),
        json!({"Effect": "Allow", "Condition": {"NumericEquals": {"s3:max-keys": 1.0}}}),
    },
    condition_value_types = {
        json!({"Effect": "Allow", "Condition": {"NumericEquals": {"s3:max-keys": [10, 10]}}}),
        json!({"Effect": "Allow", "Condition": {"NumericEquals": {"s3:max-keys": "10"}}}),
    },
    single_statement_object = {
        json!({"Effect": "Allow", "Action": "sqs:SendMessage"}),
        json!([{"Effect": "Allow", "Action": ["sqs:sendmessage"]}]),
    },
)]
fn test_equivalent_statements_canonicalize_identically(left: Value, right: Value) {
    let left = statement(left);
    let right = statement(right);
    assert_eq!(left, right);
    assert_eq!(
        serde_json::to_string(&left).unwrap(),
        serde_json::to_string(&right).unwrap()
    );
}

#[parameterized(
    resource_case = {
        json!({"Effect": "Allow", "Resource": "arn:aws:s3:::Bucket"}),
        json!({"Effect": "Allow", "Resource": "arn:aws:s3:::bucket"}),
    },
    principal_case = {
        json!({"Effect": "Allow", "Principal": {"AWS": "arn:aws:iam::111122223333:user/Alice"}}),
        json!({"Effect": "Allow", "Principal": {"AWS": "arn:aws:iam::111122223333:user/alice"}}),
    },
    condition_value_case = {
        json!({"Effect": "Allow", "Condition": {"StringEquals": {"aws:username": "Alice"}}}),
        json!({"Effect": "Allow", "Condition": {"StringEquals": {"aws:username": "alice"}}}),
    },
    effect_case = {
        json!({"Effect": "Allow"}),
        json!({"Effect": "allow"}),
    },
    action_vs_not_action = {
        json!({"Effect": "Allow", "Action": "s3:*"}),
        json!({"Effect": "Allow", "NotAction": "s3:*"}),
    },
    absent_vs_empty = {
        json!({"Effect": "Allow"}),
        json!({"Effect": "Allow", "Resource": []}),
    },
)]
fn test_different_statements_stay_different(left: Value, right: Value) {
    assert_ne!(statement(left), statement(right));
}

#[test]
fn test_case_sensitive_resources_are_two_entries() {
    let policy = statement(json!({
        "Effect": "Allow",
        "Resource": ["arn:aws:s3:::Bucket", "arn:aws:s3:::bucket"]
    }));
    assert_eq!(
        policy.statements[0].resource.as_ref().unwrap().as_slice(),
        &["arn:aws:s3:::Bucket", "arn:aws:s3:::bucket"]
    );
}

#[test]
fn test_statements_are_never_reordered() {
    let forward = statement(json!([
        {"Sid": "A", "Effect": "Allow", "Action": "s3:*"},
        {"Sid": "B", "Effect": "Deny", "Action": "s3:DeleteObject"}
    ]));
    let reversed = statement(json!([
        {"Sid": "B", "Effect": "Deny", "Action": "s3:DeleteObject"},
        {"Sid": "A", "Effect": "Allow", "Action": "s3:*"}
    ]));

    assert_eq!(forward.statements[0].sid.as_deref(), Some("A"));
    assert_eq!(forward.statements[1].sid.as_deref(), Some("B"));
    assert_ne!(forward, reversed);
}

#[test]
fn test_kitchen_sink_snapshot() {
    let policy = canonicalize_policy(KITCHEN_SINK).unwrap();
    insta::assert_json_snapshot!(policy, @r#"
    {
      "Id": "S3-Cross-Account",
      "Version": "2012-10-17",
      "Statement": [
        {
          "Sid": "CrossAccountRead",
          "Effect": "Allow",
          "Principal": {
            "AWS": [
              "111122223333",
              "arn:aws:iam::444455556666:root"
            ],
            "Service": [
              "cloudtrail.amazonaws.com"
            ]
          },
          "Action": [
            "s3:getobject",
            "s3:listbucket"
          ],
          "Resource": [
            "arn:aws:s3:::Example",
            "arn:aws:s3:::Example/*"
          ],
          "Condition": {
            "Bool": {
              "aws:securetransport": [
                "true"
              ]
            },
            "StringEquals": {
              "aws:sourceaccount": [
                "123",
                "456"
              ]
            }
          }
        },
        {
          "Sid": "DenyEverythingElse",
          "Effect": "Deny",
          "NotPrincipal": {
            "AWS": [
              "*"
            ]
          },
          "NotAction": [
            "s3:*"
          ],
          "NotResource": [
            "arn:aws:s3:::Example/*"
          ]
        }
      ]
    }
    "#);
}

#[test]
fn test_no_partial_policy_on_late_failure() {
    let result = canonicalize_policy(
        r#"{"Version":"2012-10-17","Statement":[{"Effect":"Allow","Action":"s3:*"},{"Effect":"Allow","Principal":{"AWS":[{"bad":true}]}}]}"#,
    );
    match result {
        Err(PolicyError::SchemaError { path, .. }) => {
            assert_eq!(path, "Statement[1].Principal.AWS[0]");
        }
        other => panic!("Expected SchemaError, got {other:?}"),
    }
}

#[test]
fn test_serde_deserialize_matches_canonicalize() {
    let raw = r#"{
        "Version": "2012-10-17",
        "Statement": {
            "Effect": "Allow",
            "Action": ["S3:GetObject", "s3:getobject"],
            "Principal": "*",
            "Condition": {"StringEquals": {"AWS:SourceAccount": ["1", 1.0]}}
        }
    }"#;

    let deserialized: Policy = serde_json::from_str(raw).unwrap();
    let canonical = canonicalize_policy(raw).unwrap();

    assert_eq!(deserialized, canonical);
    assert_eq!(deserialized.to_string(), canonical.to_string());
}

#[test]
fn test_serde_deserialize_round_trips_canonical_output() {
    let canonical = canonicalize_policy(KITCHEN_SINK).unwrap();
    let stored = serde_json::to_value(&canonical).unwrap();
    let restored: Policy = serde_json::from_value(stored).unwrap();
    assert_eq!(restored, canonical);
}

#[test]
fn test_serde_deserialize_rejects_bad_shapes() {
    let err = serde_json::from_str::<Policy>(r#"{"Statement": [{"Action": {"s3": 1}}]}"#)
        .unwrap_err();
    assert!(err.to_string().contains("Statement[0].Action"));
}
