//! Conversion between protocol types and API types.

use selectorlab_protocols::error::ProviderError;
use selectorlab_protocols::provider::{CompletionResponse, Message, MessageRole, Usage};

use crate::api::{ApiMessage, ApiResponse};

pub fn convert_messages(messages: &[Message]) -> Vec<ApiMessage> {
    messages
        .iter()
        .map(|m| ApiMessage {
            role: role_name(m.role).to_string(),
            content: m.content.clone(),
        })
        .collect()
}

fn role_name(role: MessageRole) -> &'static str {
    match role {
        MessageRole::System => "system",
        MessageRole::User => "user",
        MessageRole::Assistant => "assistant",
    }
}

/// Take the first choice's text. A reply without one is invalid.
pub fn parse_response(response: ApiResponse) -> Result<CompletionResponse, ProviderError> {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ProviderError::InvalidResponse("reply has no message content".to_string()))?;

    let usage = response
        .usage
        .map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
        })
        .unwrap_or_default();

    Ok(CompletionResponse {
        model: response.model,
        content,
        usage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiUsage, Choice, ResponseMessage};

    #[test]
    fn test_convert_messages() {
        let converted = convert_messages(&[
            Message::system("You write CSS selectors."),
            Message::user("Find prices"),
            Message::assistant("{}"),
        ]);
        let roles: Vec<&str> = converted.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "user", "assistant"]);
        assert_eq!(converted[1].content, "Find prices");
    }

    #[test]
    fn test_parse_response_first_choice() {
        let response = ApiResponse {
            model: "local-model".to_string(),
            choices: vec![Choice {
                message: ResponseMessage {
                    content: Some("hello".to_string()),
                },
            }],
            usage: Some(ApiUsage {
                prompt_tokens: 3,
                completion_tokens: 1,
            }),
        };
        let parsed = parse_response(response).unwrap();
        assert_eq!(parsed.content, "hello");
        assert_eq!(parsed.usage.completion_tokens, 1);
    }

    #[test]
    fn test_parse_response_empty_choices() {
        let response = ApiResponse {
            model: String::new(),
            choices: vec![],
            usage: None,
        };
        assert!(matches!(
            parse_response(response),
            Err(ProviderError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_parse_response_null_content() {
        let response = ApiResponse {
            model: String::new(),
            choices: vec![Choice {
                message: ResponseMessage { content: None },
            }],
            usage: None,
        };
        assert!(parse_response(response).is_err());
    }
}
