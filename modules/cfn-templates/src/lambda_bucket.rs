use serde_json::json;

use crate::error::Result;
use crate::template::{
    bucket_and_objects_arns, ref_to, Parameter, Resource, Template, POLICY_VERSION,
};

/// S3 bucket the Lambda service can download function packages from.
pub fn lambda_bucket_template() -> Result<Template> {
    let mut template = Template::new();
    template.set_description("Creates an S3 bucket that can be used when uploading lambda packages");

    let bucket_name = template.add_parameter(
        "BucketName",
        Parameter::string("Name of the S3 bucket that will contain lambda packages"),
    )?;

    let bucket = template.add_resource(
        "LambdaBucket",
        Resource::new(
            "AWS::S3::Bucket",
            json!({
                "BucketName": ref_to(&bucket_name),
                "BucketEncryption": {
                    "ServerSideEncryptionConfiguration": [{
                        "ServerSideEncryptionByDefault": { "SSEAlgorithm": "AES256" },
                    }],
                },
                "VersioningConfiguration": { "Status": "Enabled" },
            }),
        ),
    )?;

    template.add_resource(
        "LambdaBucketPolicy",
        Resource::new(
            "AWS::S3::BucketPolicy",
            json!({
                "Bucket": ref_to(&bucket),
                "PolicyDocument": {
                    "Version": POLICY_VERSION,
                    "Statement": [{
                        "Sid": "ReadPerm",
                        "Effect": "Allow",
                        "Principal": { "Service": ["lambda.amazonaws.com"] },
                        "Action": ["s3:Get*", "s3:List*"],
                        "Resource": bucket_and_objects_arns(ref_to(&bucket_name)),
                    }],
                },
            }),
        ),
    )?;

    Ok(template)
}
