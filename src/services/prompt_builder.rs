use crate::models::{FaqEntry, TicketEvent};

/// Instruction appended to every generation prompt
const STYLE_INSTRUCTION: &str =
    "Answer professionally, concisely and reassuringly. You may use light markdown for structure.";

/// Hint words suggesting an admin prompt already references the ticket
const TICKET_CONTEXT_HINTS: [&str; 5] = ["ticket", "title", "description", "message", "id"];

/// Hint tokens suggesting an admin prompt already embeds FAQ content
const FAQ_HINTS: [&str; 3] = ["faq", "q:", "r:"];

/// Assemble the generation prompt for an AI reply.
///
/// Without an admin prompt, a default prompt embedding the ticket fields is
/// synthesized. An admin prompt is used verbatim, with the ticket-context
/// block prepended and the FAQ block appended only when the hint words are
/// absent. The hint check is plain substring containment, a best-effort
/// guard against duplicated context rather than a guarantee. The style
/// instruction is always appended last.
pub fn build_prompt(
    ticket: &TicketEvent,
    admin_prompt: Option<&str>,
    faq: Option<&FaqEntry>,
) -> String {
    match admin_prompt {
        None => {
            let mut prompt = String::from(
                "You are the support assistant of a helpdesk. A client just opened the following ticket:\n\n",
            );
            prompt.push_str(&ticket_block(ticket));
            if let Some(faq) = faq {
                prompt.push_str("\n\n");
                prompt.push_str(&faq_block(faq));
            }
            prompt.push_str("\n\n");
            prompt.push_str(STYLE_INSTRUCTION);
            prompt
        }
        Some(admin_prompt) => {
            let mut prompt = String::new();
            if !references_ticket_context(admin_prompt) {
                prompt.push_str(&ticket_block(ticket));
                prompt.push_str("\n\n");
            }
            prompt.push_str(admin_prompt.trim());
            if let Some(faq) = faq {
                if !references_faq(admin_prompt) {
                    prompt.push_str("\n\n");
                    prompt.push_str(&faq_block(faq));
                }
            }
            prompt.push_str("\n\n");
            prompt.push_str(STYLE_INSTRUCTION);
            prompt
        }
    }
}

fn ticket_block(ticket: &TicketEvent) -> String {
    let mut block = format!(
        "Ticket {}\nTitle: {}\nDescription: {}",
        ticket.id, ticket.title, ticket.description
    );
    if let Some(message) = &ticket.message {
        block.push_str(&format!("\nFirst message: {}", message));
    }
    block
}

fn faq_block(faq: &FaqEntry) -> String {
    format!(
        "FAQ to take into account:\nQ: {}\nR: {}",
        faq.question, faq.answer
    )
}

fn references_ticket_context(prompt: &str) -> bool {
    let lower = prompt.to_lowercase();
    TICKET_CONTEXT_HINTS.iter().any(|hint| lower.contains(hint))
}

fn references_faq(prompt: &str) -> bool {
    let lower = prompt.to_lowercase();
    FAQ_HINTS.iter().any(|hint| lower.contains(hint))
}
