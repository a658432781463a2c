//! HTTP DTOs for idea endpoints.
//!
//! Wire format is camelCase JSON. These types decouple the HTTP API from the
//! aggregate so the stored document can evolve independently.

use serde::{Deserialize, Deserializer, Serialize};

use crate::application::{AddCommentResult, AddPollResult, AddReplyResult, CommentPage};
use crate::domain::foundation::{OptionId, PollId, Stage, Timestamp, UserId, ValidationError};
use crate::domain::idea::{
    Comment, Idea, IdeaDraft, IdeaPatch, OptionDraft, Poll, PollDraft, PollOption, Reactions,
    Reply,
};
use crate::ports::{IdeaList, IdeaSummary};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to post a new idea.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIdeaRequest {
    #[serde(default)]
    pub problem: String,
    #[serde(default)]
    pub solution: String,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub auto_delete_after_days: Option<i64>,
    #[serde(default)]
    pub polls: Vec<PollRequest>,
}

impl TryFrom<CreateIdeaRequest> for IdeaDraft {
    type Error = ValidationError;

    fn try_from(req: CreateIdeaRequest) -> Result<Self, Self::Error> {
        Ok(IdeaDraft {
            problem: req.problem,
            solution: req.solution,
            stage: req.stage,
            link: req.link,
            auto_delete_after_days: req.auto_delete_after_days,
            polls: poll_drafts(req.polls)?,
        })
    }
}

/// Partial update of an idea.
///
/// `link` and `autoDeleteAfterDays` distinguish an absent field (keep) from
/// an explicit `null` (clear).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIdeaRequest {
    #[serde(default)]
    pub problem: Option<String>,
    #[serde(default)]
    pub solution: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub link: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub auto_delete_after_days: Option<Option<i64>>,
    #[serde(default)]
    pub polls: Option<Vec<PollRequest>>,
}

impl TryFrom<UpdateIdeaRequest> for IdeaPatch {
    type Error = ValidationError;

    fn try_from(req: UpdateIdeaRequest) -> Result<Self, Self::Error> {
        Ok(IdeaPatch {
            problem: req.problem,
            solution: req.solution,
            stage: req.stage,
            link: req.link,
            auto_delete_after_days: req.auto_delete_after_days,
            polls: req.polls.map(poll_drafts).transpose()?,
        })
    }
}

/// A poll embedded in a create or update request.
///
/// Ids are optional; missing ones are generated. Votes sent by clients are
/// ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollRequest {
    #[serde(default)]
    pub poll_id: Option<String>,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub options: Vec<OptionRequest>,
}

/// A poll option, either bare text or an object with an optional id.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OptionRequest {
    Text(String),
    #[serde(rename_all = "camelCase")]
    Full {
        #[serde(default)]
        option_id: Option<String>,
        text: String,
    },
}

fn poll_drafts(polls: Vec<PollRequest>) -> Result<Vec<PollDraft>, ValidationError> {
    polls
        .into_iter()
        .map(|poll| {
            let options = poll
                .options
                .into_iter()
                .map(|option| match option {
                    OptionRequest::Text(text) => Ok(OptionDraft::text(text)),
                    OptionRequest::Full { option_id, text } => Ok(OptionDraft {
                        option_id: option_id.map(OptionId::new).transpose()?,
                        text,
                    }),
                })
                .collect::<Result<Vec<_>, ValidationError>>()?;
            Ok(PollDraft {
                poll_id: poll.poll_id.map(PollId::new).transpose()?,
                question: poll.question,
                options,
            })
        })
        .collect()
}

/// Request to add a poll to an existing idea.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPollRequest {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
}

/// Request to vote on a poll option.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    #[serde(default)]
    pub option_id: String,
}

/// Body for adding or editing a comment or reply.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentTextRequest {
    #[serde(default)]
    pub text: String,
}

/// Query parameters for listing ideas.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListIdeasParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

/// Query parameters for paged sub-resources.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

/// Treats an explicit `null` as `Some(None)` so it can clear a field.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Full idea document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaResponse {
    pub id: String,
    pub owner_id: String,
    pub problem: String,
    pub solution: String,
    pub stage: Stage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_delete_after_days: Option<u32>,
    pub likes: Vec<String>,
    pub dislikes: Vec<String>,
    pub number_of_likes: usize,
    pub number_of_dislikes: usize,
    pub polls: Vec<PollResponse>,
    pub comments: Vec<CommentResponse>,
    pub comment_count: usize,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Idea> for IdeaResponse {
    fn from(idea: &Idea) -> Self {
        let (likes, dislikes) = reaction_lists(idea.reactions());
        Self {
            id: idea.id().to_string(),
            owner_id: idea.owner_id().to_string(),
            problem: idea.problem().to_string(),
            solution: idea.solution().to_string(),
            stage: idea.stage(),
            link: idea.link().map(str::to_string),
            auto_delete_after_days: idea.auto_delete_after_days(),
            number_of_likes: likes.len(),
            number_of_dislikes: dislikes.len(),
            likes,
            dislikes,
            polls: idea.polls().iter().map(PollResponse::from).collect(),
            comments: idea.comments().iter().map(CommentResponse::from).collect(),
            comment_count: idea.comments().len(),
            created_at: rfc3339(idea.created_at()),
            updated_at: rfc3339(idea.updated_at()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollResponse {
    pub poll_id: String,
    pub question: String,
    pub options: Vec<PollOptionResponse>,
    pub total_votes: usize,
}

impl From<&Poll> for PollResponse {
    fn from(poll: &Poll) -> Self {
        Self {
            poll_id: poll.id().to_string(),
            question: poll.question().to_string(),
            options: poll.options().iter().map(PollOptionResponse::from).collect(),
            total_votes: poll.total_votes(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollOptionResponse {
    pub option_id: String,
    pub text: String,
    pub votes: Vec<String>,
    pub vote_count: usize,
}

impl From<&PollOption> for PollOptionResponse {
    fn from(option: &PollOption) -> Self {
        Self {
            option_id: option.id().to_string(),
            text: option.text().to_string(),
            votes: user_strings(option.votes()),
            vote_count: option.vote_count(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub comment_id: String,
    pub author_id: String,
    pub author_display_name: String,
    pub text: String,
    pub likes: Vec<String>,
    pub dislikes: Vec<String>,
    pub number_of_likes: usize,
    pub number_of_dislikes: usize,
    pub replies: Vec<ReplyResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        let (likes, dislikes) = reaction_lists(comment.reactions());
        Self {
            comment_id: comment.id().to_string(),
            author_id: comment.author_id().to_string(),
            author_display_name: comment.author_name().to_string(),
            text: comment.text().to_string(),
            number_of_likes: likes.len(),
            number_of_dislikes: dislikes.len(),
            likes,
            dislikes,
            replies: comment.replies().iter().map(ReplyResponse::from).collect(),
            created_at: rfc3339(comment.created_at()),
            updated_at: rfc3339(comment.updated_at()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyResponse {
    pub reply_id: String,
    pub author_id: String,
    pub author_display_name: String,
    pub text: String,
    pub likes: Vec<String>,
    pub dislikes: Vec<String>,
    pub number_of_likes: usize,
    pub number_of_dislikes: usize,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Reply> for ReplyResponse {
    fn from(reply: &Reply) -> Self {
        let (likes, dislikes) = reaction_lists(reply.reactions());
        Self {
            reply_id: reply.id().to_string(),
            author_id: reply.author_id().to_string(),
            author_display_name: reply.author_name().to_string(),
            text: reply.text().to_string(),
            number_of_likes: likes.len(),
            number_of_dislikes: dislikes.len(),
            likes,
            dislikes,
            created_at: rfc3339(reply.created_at()),
            updated_at: rfc3339(reply.updated_at()),
        }
    }
}

/// Idea plus the id of a poll it just gained.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPollResponse {
    pub poll_id: String,
    pub idea: IdeaResponse,
}

impl From<AddPollResult> for AddPollResponse {
    fn from(result: AddPollResult) -> Self {
        Self {
            poll_id: result.poll_id.to_string(),
            idea: IdeaResponse::from(&result.idea),
        }
    }
}

/// Idea plus the id of a comment it just gained.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentResponse {
    pub comment_id: String,
    pub idea: IdeaResponse,
}

impl From<AddCommentResult> for AddCommentResponse {
    fn from(result: AddCommentResult) -> Self {
        Self {
            comment_id: result.comment_id.to_string(),
            idea: IdeaResponse::from(&result.idea),
        }
    }
}

/// Idea plus the id of a reply it just gained.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddReplyResponse {
    pub reply_id: String,
    pub idea: IdeaResponse,
}

impl From<AddReplyResult> for AddReplyResponse {
    fn from(result: AddReplyResult) -> Self {
        Self {
            reply_id: result.reply_id.to_string(),
            idea: IdeaResponse::from(&result.idea),
        }
    }
}

/// Summary row for idea listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaSummaryResponse {
    pub id: String,
    pub owner_id: String,
    pub problem: String,
    pub solution: String,
    pub stage: Stage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub number_of_likes: u64,
    pub number_of_dislikes: u64,
    pub poll_count: u64,
    pub comment_count: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<IdeaSummary> for IdeaSummaryResponse {
    fn from(summary: IdeaSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            owner_id: summary.owner_id.to_string(),
            problem: summary.problem,
            solution: summary.solution,
            stage: summary.stage,
            link: summary.link,
            number_of_likes: summary.number_of_likes,
            number_of_dislikes: summary.number_of_dislikes,
            poll_count: summary.poll_count,
            comment_count: summary.comment_count,
            created_at: rfc3339(&summary.created_at),
            updated_at: rfc3339(&summary.updated_at),
        }
    }
}

/// Paginated list of ideas.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaListResponse {
    pub items: Vec<IdeaSummaryResponse>,
    pub total: u64,
    pub has_more: bool,
}

impl From<IdeaList> for IdeaListResponse {
    fn from(list: IdeaList) -> Self {
        Self {
            items: list.items.into_iter().map(IdeaSummaryResponse::from).collect(),
            total: list.total,
            has_more: list.has_more,
        }
    }
}

/// Paginated list of comments, newest first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPageResponse {
    pub items: Vec<CommentResponse>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub has_more: bool,
}

impl From<CommentPage> for CommentPageResponse {
    fn from(page: CommentPage) -> Self {
        Self {
            items: page.items.iter().map(CommentResponse::from).collect(),
            page: page.page,
            per_page: page.per_page,
            total: page.total,
            has_more: page.has_more,
        }
    }
}

fn reaction_lists(reactions: &Reactions) -> (Vec<String>, Vec<String>) {
    (
        user_strings(reactions.likes()),
        user_strings(reactions.dislikes()),
    )
}

fn user_strings<'a>(users: impl Iterator<Item = &'a UserId>) -> Vec<String> {
    users.map(|u| u.to_string()).collect()
}

fn rfc3339(ts: &Timestamp) -> String {
    ts.as_datetime().to_rfc3339()
}

// ════════════════════════════════════════════════════════════════════════════
// Error Response
// ════════════════════════════════════════════════════════════════════════════

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    /// Field-level validation failure.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self {
            code: "VALIDATION_FAILED".to_string(),
            message: message.into(),
            details: Some(serde_json::json!({ "field": field })),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

impl From<ValidationError> for ErrorResponse {
    fn from(err: ValidationError) -> Self {
        let field = err.field().to_string();
        ErrorResponse::validation(&field, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_distinguishes_null_from_absent() {
        let absent: UpdateIdeaRequest = serde_json::from_str(r#"{"problem":"p"}"#).unwrap();
        assert_eq!(absent.link, None);
        assert_eq!(absent.auto_delete_after_days, None);

        let cleared: UpdateIdeaRequest =
            serde_json::from_str(r#"{"link":null,"autoDeleteAfterDays":null}"#).unwrap();
        assert_eq!(cleared.link, Some(None));
        assert_eq!(cleared.auto_delete_after_days, Some(None));

        let set: UpdateIdeaRequest =
            serde_json::from_str(r#"{"link":"https://x.io","autoDeleteAfterDays":3}"#).unwrap();
        assert_eq!(set.link, Some(Some("https://x.io".to_string())));
        assert_eq!(set.auto_delete_after_days, Some(Some(3)));
    }

    #[test]
    fn create_request_accepts_bare_and_identified_options() {
        let req: CreateIdeaRequest = serde_json::from_str(
            r#"{
                "problem": "p",
                "solution": "s",
                "stage": "Concept",
                "polls": [{
                    "pollId": "p1",
                    "question": "Which?",
                    "options": ["A", {"optionId": "o2", "text": "B", "votes": ["x"]}]
                }]
            }"#,
        )
        .unwrap();

        let draft = IdeaDraft::try_from(req).unwrap();
        let poll = &draft.polls[0];
        assert_eq!(poll.poll_id.as_ref().map(|p| p.as_str()), Some("p1"));
        assert_eq!(poll.options[0].option_id, None);
        assert_eq!(poll.options[0].text, "A");
        assert_eq!(
            poll.options[1].option_id.as_ref().map(|o| o.as_str()),
            Some("o2")
        );
    }

    #[test]
    fn blank_client_poll_id_is_validation_error() {
        let req = UpdateIdeaRequest {
            polls: Some(vec![PollRequest {
                poll_id: Some("  ".to_string()),
                question: "Q".to_string(),
                options: vec![],
            }]),
            ..Default::default()
        };
        assert!(IdeaPatch::try_from(req).is_err());
    }

    #[test]
    fn validation_error_response_carries_field() {
        let response = ErrorResponse::validation("stage", "stage is required");
        assert_eq!(response.code, "VALIDATION_FAILED");
        assert_eq!(response.details.unwrap()["field"], "stage");
    }

    #[test]
    fn idea_response_exposes_counters() {
        let owner = UserId::new("owner").unwrap();
        let mut idea = Idea::create(
            crate::domain::foundation::IdeaId::new(),
            owner.clone(),
            IdeaDraft {
                problem: "p".to_string(),
                solution: "s".to_string(),
                stage: Some("MVP".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        idea.like(&UserId::new("fan").unwrap());
        idea.add_comment(owner, "Owner", "first").unwrap();

        let json = serde_json::to_value(IdeaResponse::from(&idea)).unwrap();
        assert_eq!(json["numberOfLikes"], 1);
        assert_eq!(json["numberOfDislikes"], 0);
        assert_eq!(json["commentCount"], 1);
        assert_eq!(json["stage"], "MVP");
        assert_eq!(json["comments"][0]["authorDisplayName"], "Owner");
        assert!(json.get("link").is_none());
    }
}
