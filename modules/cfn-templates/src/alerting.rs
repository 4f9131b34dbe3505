//! Budget alerting stack: SNS topics, forwarding functions and the budget itself.

use serde_json::{json, Value};

use crate::error::Result;
use crate::template::{ref_to, Parameter, Resource, Template, POLICY_VERSION};

/// The forwarder is a Rust binary packaged as `bootstrap` for the custom runtime.
pub const LAMBDA_RUNTIME: &str = "provided.al2023";
pub const LAMBDA_HANDLER: &str = "bootstrap";
pub const LAMBDA_CODE_URI: &str = "target/lambda/slack-forwarder/";
pub const LAMBDA_MEMORY_MB: u32 = 128;
pub const LAMBDA_TIMEOUT_SECS: u32 = 10;

/// One Slack forwarding function.
#[derive(Debug, Clone)]
pub struct LambdaMetaData {
    pub description: String,
    pub name: String,
    /// `Ref` to the parameter holding the Slack webhook URL.
    pub webhook_url: Value,
    /// `Ref` to the text prepended to every alert, e.g. a friendly account name.
    pub message_prefix: Value,
}

/// Alert kinds understood by AWS Budgets notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    Actual,
    Forecasted,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Actual => "ACTUAL",
            Self::Forecasted => "FORECASTED",
        }
    }
}

/// Add an SNS topic plus the function subscribed to it; returns the topic's logical id.
pub fn add_topic_and_lambda(
    template: &mut Template,
    topic_name: &str,
    lambda: &LambdaMetaData,
) -> Result<String> {
    let topic = template.add_resource(
        &format!("{topic_name}Topic"),
        Resource::new("AWS::SNS::Topic", json!({ "TopicName": topic_name })),
    )?;

    template.add_resource(
        &format!("{}Lambda", lambda.name),
        Resource::new(
            "AWS::Serverless::Function",
            json!({
                "Description": lambda.description,
                "MemorySize": LAMBDA_MEMORY_MB,
                "FunctionName": lambda.name,
                "Runtime": LAMBDA_RUNTIME,
                "Handler": LAMBDA_HANDLER,
                "CodeUri": LAMBDA_CODE_URI,
                "Timeout": LAMBDA_TIMEOUT_SECS,
                "Environment": {
                    "Variables": {
                        "WEBHOOK_URL": lambda.webhook_url,
                        "MESSAGE_PREFIX": lambda.message_prefix,
                    }
                },
                "Events": {
                    "SNS": {
                        "Type": "SNS",
                        "Properties": { "Topic": ref_to(&topic) },
                    }
                },
            }),
        ),
    )?;

    Ok(topic)
}

/// Let the AWS Budgets service publish to `topic`.
pub fn add_topic_policy(template: &mut Template, topic: &str) -> Result<String> {
    template.add_resource(
        &format!("{topic}Policy"),
        Resource::new(
            "AWS::SNS::TopicPolicy",
            json!({
                "PolicyDocument": {
                    "Id": "BudgetTopicPolicy",
                    "Version": POLICY_VERSION,
                    "Statement": [{
                        "Sid": "AWSBudgets-sns-notification",
                        "Effect": "Allow",
                        "Principal": { "Service": "budgets.amazonaws.com" },
                        "Action": "SNS:Publish",
                        "Resource": ref_to(topic),
                    }],
                },
                "Topics": [ref_to(topic)],
            }),
        ),
    )
}

/// A budget notification firing above `threshold_param` percent, delivered to `topic`.
pub fn notification_with_subscriber(
    notification_type: NotificationType,
    threshold_param: &str,
    topic: &str,
) -> Value {
    json!({
        "Notification": {
            "ComparisonOperator": "GREATER_THAN",
            "NotificationType": notification_type.as_str(),
            "Threshold": ref_to(threshold_param),
            "ThresholdType": "PERCENTAGE",
        },
        "Subscribers": [{
            "Address": ref_to(topic),
            "SubscriptionType": "SNS",
        }],
    })
}

/// Build the alerting stack.
pub fn alerting_template() -> Result<Template> {
    let mut template = Template::new();
    template.set_description("Stack alerting forecasted and actual AWS budget overspend to Slack");
    template.set_version("2010-09-09");
    template.set_transform("AWS::Serverless-2016-10-31");

    let monthly_budget = template.add_parameter(
        "MonthlyBudget",
        Parameter::number("Monthly budget for the account (in USD)"),
    )?;
    let message_prefix = template.add_parameter(
        "MessagePrefix",
        Parameter::string(
            "A string that will be pre-pend to alert messages, e.g. to specify a friendly AWS account name",
        )
        .with_default(""),
    )?;

    // actual costs
    let actual_webhook = template.add_parameter(
        "ActualCostWebHookUrl",
        Parameter::string("webhook for posting messages to the actual AWS cost Slack channel"),
    )?;
    let actual_topic = add_topic_and_lambda(
        &mut template,
        "ActualBudgetAlert",
        &LambdaMetaData {
            description: "Posts a message to the actual budget alert Slack channel".to_string(),
            name: "ActualCostSlackNotification".to_string(),
            webhook_url: ref_to(&actual_webhook),
            message_prefix: ref_to(&message_prefix),
        },
    )?;
    let actual_threshold = template.add_parameter(
        "ActualThreshold",
        Parameter::number(
            "Threshold (percentage) compared to the actual cost that should trigger an alert",
        ),
    )?;

    // forecasted costs
    let forecasted_webhook = template.add_parameter(
        "ForecastedCostWebHookUrl",
        Parameter::string("webhook for posting messages to the forecasted AWS cost Slack channel"),
    )?;
    let forecasted_topic = add_topic_and_lambda(
        &mut template,
        "ForecastedBudgetAlert",
        &LambdaMetaData {
            description: "Posts a message to the forecasted budget alert Slack channel"
                .to_string(),
            name: "ForecastedCostSlackNotification".to_string(),
            webhook_url: ref_to(&forecasted_webhook),
            message_prefix: ref_to(&message_prefix),
        },
    )?;
    let forecasted_threshold = template.add_parameter(
        "ForecastedThreshold",
        Parameter::number(
            "Threshold (percentage) compared to the forecasted cost that should trigger an alert",
        ),
    )?;

    template.add_resource(
        "Budget",
        Resource::new(
            "AWS::Budgets::Budget",
            json!({
                "Budget": {
                    "BudgetType": "COST",
                    "TimeUnit": "MONTHLY",
                    "BudgetName": "Monthly Budget",
                    "BudgetLimit": {
                        "Amount": ref_to(&monthly_budget),
                        "Unit": "USD",
                    },
                },
                "NotificationsWithSubscribers": [
                    notification_with_subscriber(
                        NotificationType::Actual,
                        &actual_threshold,
                        &actual_topic,
                    ),
                    notification_with_subscriber(
                        NotificationType::Forecasted,
                        &forecasted_threshold,
                        &forecasted_topic,
                    ),
                ],
            }),
        ),
    )?;

    add_topic_policy(&mut template, &actual_topic)?;
    add_topic_policy(&mut template, &forecasted_topic)?;

    Ok(template)
}
