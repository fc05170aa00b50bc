//! Keyword-matched wellness companion chat. Replies come from fixed
//! response tables keyed on what the user's message mentions, with a short
//! randomized delay so the reply does not land instantly.

use std::{sync::Mutex, time::Duration};

use chrono::{DateTime, Utc};
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tauri::State;
use tokio::time;
use uuid::Uuid;

use crate::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Emotion {
    Supportive,
    Encouraging,
    Calming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<Emotion>,
}

impl ChatMessage {
    fn user(text: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text,
            sender: Sender::User,
            timestamp: Utc::now(),
            emotion: None,
        }
    }

    fn assistant(text: String, emotion: Emotion) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text,
            sender: Sender::Assistant,
            timestamp: Utc::now(),
            emotion: Some(emotion),
        }
    }
}

const STRESS_REPLIES: &[(&str, Emotion)] = &[
    (
        "I hear that you're feeling stressed. That's completely normal, especially as a student. Let's take a moment together. Try taking three deep breaths with me. What's been weighing on your mind the most?",
        Emotion::Calming,
    ),
    (
        "Stress can feel overwhelming, but remember that you've handled difficult situations before and you can handle this too. Would you like to talk about what's causing the stress, or should we try some quick relaxation techniques?",
        Emotion::Supportive,
    ),
];

const ACADEMIC_REPLIES: &[(&str, Emotion)] = &[
    (
        "Academic pressure is real! Remember, your worth isn't defined by grades. Let's break down what you're facing. Sometimes talking through your study plan can make things feel more manageable. What subject or task is challenging you most?",
        Emotion::Encouraging,
    ),
    (
        "Exams and assignments can be stressful, but you're taking the right step by reaching out. Have you tried breaking your study material into smaller, manageable chunks? I can help you think through some study strategies!",
        Emotion::Supportive,
    ),
];

const POSITIVE_REPLIES: &[(&str, Emotion)] = &[
    (
        "That's wonderful to hear! 😊 I'm so glad you're feeling good. What's been going well for you today? Celebrating the positive moments is important for our mental health.",
        Emotion::Encouraging,
    ),
    (
        "I love hearing that! When we're feeling good, it's a great time to build some positive habits or reflect on what's working well in our lives. Is there anything specific that's contributing to your good mood?",
        Emotion::Supportive,
    ),
];

const SLEEP_REPLY: (&str, Emotion) = (
    "Sleep is so important for managing stress and academic performance. Are you having trouble falling asleep, staying asleep, or just not getting enough hours? I can share some tips for better sleep hygiene that many students find helpful.",
    Emotion::Calming,
);

const THANKS_REPLY: (&str, Emotion) = (
    "You're so welcome! 💙 It means a lot to me that I can be here for you. Remember, seeking support is a sign of strength, not weakness. Is there anything else on your mind that you'd like to talk through?",
    Emotion::Supportive,
);

const DEFAULT_REPLIES: &[(&str, Emotion)] = &[
    (
        "I'm here to listen and support you. Sometimes just talking through what's on your mind can help clarify things. What would you like to share with me?",
        Emotion::Supportive,
    ),
    (
        "Thank you for sharing that with me. Your feelings are valid, and it's okay to not have everything figured out. What's one small thing that might help you feel a bit better right now?",
        Emotion::Calming,
    ),
    (
        "I appreciate you opening up to me. Remember, every challenge you're facing is temporary, and you have more strength than you realize. How can I best support you today?",
        Emotion::Encouraging,
    ),
];

pub const SUGGESTED_PROMPTS: &[&str] = &[
    "I'm feeling stressed about exams",
    "I need help with motivation",
    "I'm having trouble sleeping",
    "I want to feel more positive",
];

fn contains_any(message: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| message.contains(keyword))
}

fn pick(replies: &'static [(&'static str, Emotion)]) -> (&'static str, Emotion) {
    replies[rand::thread_rng().gen_range(0..replies.len())]
}

/// Keyword routing: first matching category wins, in the same order the
/// categories are checked here.
pub fn reply_for(message: &str) -> (&'static str, Emotion) {
    let lower = message.to_lowercase();

    if contains_any(&lower, &["stress", "anxious", "overwhelmed"]) {
        pick(STRESS_REPLIES)
    } else if contains_any(&lower, &["exam", "study", "assignment", "test"]) {
        pick(ACADEMIC_REPLIES)
    } else if contains_any(&lower, &["good", "happy", "great", "fine"]) {
        pick(POSITIVE_REPLIES)
    } else if contains_any(&lower, &["sleep", "tired", "exhausted"]) {
        SLEEP_REPLY
    } else if contains_any(&lower, &["thank", "appreciate"]) {
        THANKS_REPLY
    } else {
        pick(DEFAULT_REPLIES)
    }
}

pub fn greeting(user_name: &str) -> ChatMessage {
    ChatMessage::assistant(
        format!(
            "Hi {user_name}! 👋 I'm your wellness companion. I'm here to listen, support, and help you manage stress. How are you feeling today?"
        ),
        Emotion::Supportive,
    )
}

#[derive(Default)]
pub struct ChatHistory {
    messages: Mutex<Vec<ChatMessage>>,
}

impl ChatHistory {
    fn push(&self, message: ChatMessage) {
        self.messages.lock().unwrap().push(message);
    }

    fn all(&self) -> Vec<ChatMessage> {
        self.messages.lock().unwrap().clone()
    }

    fn is_empty(&self) -> bool {
        self.messages.lock().unwrap().is_empty()
    }
}

/// Record the user's message and return the companion reply after a 1.5 to
/// 2.5 second pause, mimicking a typing indicator window.
#[tauri::command]
pub async fn send_chat_message(
    state: State<'_, AppState>,
    text: String,
) -> Result<ChatMessage, String> {
    let text = text.trim().to_string();
    if text.is_empty() {
        return Err("message cannot be empty".to_string());
    }

    state.chat.push(ChatMessage::user(text.clone()));

    // thread_rng is not Send, so draw everything before awaiting.
    let (reply, emotion) = reply_for(&text);
    let delay_ms = rand::thread_rng().gen_range(1500..=2500);
    debug!("chat reply in {delay_ms}ms");
    time::sleep(Duration::from_millis(delay_ms)).await;

    let message = ChatMessage::assistant(reply.to_string(), emotion);
    state.chat.push(message.clone());
    Ok(message)
}

#[tauri::command]
pub fn get_chat_history(state: State<'_, AppState>) -> Vec<ChatMessage> {
    if state.chat.is_empty() {
        let name = state
            .profile
            .get()
            .map(|profile| profile.personal.name)
            .unwrap_or_else(|| "there".to_string());
        state.chat.push(greeting(&name));
    }
    state.chat.all()
}

#[tauri::command]
pub fn get_suggested_prompts() -> Vec<&'static str> {
    SUGGESTED_PROMPTS.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stress_keywords_route_to_calming_or_supportive() {
        for message in ["I'm so stressed", "feeling ANXIOUS today", "overwhelmed by it all"] {
            let (text, emotion) = reply_for(message);
            assert!(
                STRESS_REPLIES.iter().any(|(t, _)| t == &text),
                "{message} routed elsewhere"
            );
            assert!(matches!(emotion, Emotion::Calming | Emotion::Supportive));
        }
    }

    #[test]
    fn academic_keywords_route_to_study_replies() {
        let (text, _) = reply_for("my exam is tomorrow");
        assert!(ACADEMIC_REPLIES.iter().any(|(t, _)| t == &text));
    }

    #[test]
    fn stress_wins_over_academic_when_both_match() {
        let (text, _) = reply_for("stressed about my exam");
        assert!(STRESS_REPLIES.iter().any(|(t, _)| t == &text));
    }

    #[test]
    fn sleep_and_thanks_have_fixed_replies() {
        assert_eq!(reply_for("I can't sleep").0, SLEEP_REPLY.0);
        assert_eq!(reply_for("thank you so much").0, THANKS_REPLY.0);
    }

    #[test]
    fn unmatched_messages_fall_through_to_defaults() {
        let (text, _) = reply_for("the weather is weird");
        assert!(DEFAULT_REPLIES.iter().any(|(t, _)| t == &text));
    }

    #[test]
    fn greeting_addresses_the_user_by_name() {
        let message = greeting("Maya");
        assert!(message.text.contains("Hi Maya!"));
        assert_eq!(message.emotion, Some(Emotion::Supportive));
        assert_eq!(message.sender, Sender::Assistant);
    }
}
