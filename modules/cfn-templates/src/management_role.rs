//! IAM role that may create and manage the alerting stack.

use serde_json::json;

use crate::error::Result;
use crate::template::{
    bucket_and_objects_arns, join, ref_to, Parameter, Resource, Template, POLICY_VERSION,
};

pub const DEFAULT_ROLE_NAME: &str = "AwsBudgetAlertingManagementRole";
pub const MANAGED_POLICY_NAME: &str = "budget-alerting-management";

const IAM_ROLE_ACTIONS: &[&str] = &[
    "iam:AttachRolePolicy",
    "iam:CreateRole",
    "iam:CreateServiceLinkedRole",
    "iam:DeleteRole",
    "iam:DeleteRolePolicy",
    "iam:DeleteServiceLinkedRole",
    "iam:DetachRolePolicy",
    "iam:GetRole",
    "iam:GetRolePolicy",
    "iam:GetServiceLinkedRoleDeletionStatus",
    "iam:ListRole*",
    "iam:PassRole",
    "iam:PutRolePolicy",
    "iam:SimulatePrincipalPolicy",
    "iam:TagRole",
    "iam:UntagRole",
    "iam:UpdateAssumeRolePolicy",
];

fn admin_statement(sid: &str, service: &str) -> serde_json::Value {
    json!({
        "Sid": sid,
        "Action": [format!("{service}:*")],
        "Effect": "Allow",
        "Resource": ["*"],
    })
}

pub fn management_role_template() -> Result<Template> {
    let mut template = Template::new();
    template.set_description(
        "Template creating IAM resources (role) allowing to create cost alerting resources",
    );
    template.set_version("2010-09-09");

    let assume_role_name = template.add_parameter(
        "AssumeRoleName",
        Parameter::string(
            "Name of the role that should be allowed to assume the role allowing to create the alerting resources",
        ),
    )?;
    template.add_parameter(
        "RoleName",
        Parameter::string(
            "Name of the role to assume in order to have the access rights to manage cost alerting resources",
        )
        .with_default(DEFAULT_ROLE_NAME),
    )?;
    let lambda_bucket_name = template.add_parameter(
        "LambdaBucketName",
        Parameter::string(
            "Name of the S3 bucket name containing the package for the Lambda publishing a message to Slack",
        ),
    )?;

    let policy = template.add_resource(
        "AwsBudgetAlertingManagementPolicy",
        Resource::new(
            "AWS::IAM::ManagedPolicy",
            json!({
                "Description": "Policy allowing managing alerting resources for AWS Budgets",
                "ManagedPolicyName": MANAGED_POLICY_NAME,
                "PolicyDocument": {
                    "Version": POLICY_VERSION,
                    "Statement": [
                        admin_statement("AllowCloudFormationAdmin", "cloudformation"),
                        admin_statement("AllowLambdaAdmin", "lambda"),
                        admin_statement("AllowSnsAdmin", "sns"),
                        admin_statement("AllowBudgetsAdmin", "budgets"),
                        {
                            "Sid": "AllowIamRoleManagement",
                            "Action": IAM_ROLE_ACTIONS,
                            "Effect": "Allow",
                            "Resource": ["*"],
                        },
                        {
                            "Sid": "AllowLambdaBucketReadWrite",
                            "Action": ["s3:*"],
                            "Effect": "Allow",
                            "Resource": bucket_and_objects_arns(ref_to(&lambda_bucket_name)),
                        },
                    ],
                },
            }),
        ),
    )?;

    // arn:aws:iam::<account id>:role/<assume role name>
    let principal = join(
        "",
        vec![
            json!("arn:aws:iam::"),
            ref_to("AWS::AccountId"),
            json!(":role/"),
            ref_to(&assume_role_name),
        ],
    );

    template.add_resource(
        "AwsBudgetAlertingManagementRole",
        Resource::new(
            "AWS::IAM::Role",
            json!({
                "RoleName": MANAGED_POLICY_NAME,
                "AssumeRolePolicyDocument": {
                    "Statement": [{
                        "Effect": "Allow",
                        "Principal": { "AWS": principal },
                        "Action": ["sts:AssumeRole"],
                    }],
                },
                "ManagedPolicyArns": [ref_to(&policy)],
            }),
        ),
    )?;

    Ok(template)
}
