/// Reassembles server-sent events from arbitrarily split stream reads.
/// An event is complete once its blank-line separator arrives; only `data:`
/// lines carry chunk payloads.
#[derive(Default)]
pub(crate) struct EventBuffer {
    pending: String,
}

impl EventBuffer {
    /// Feeds one network read into the buffer and returns the data payloads
    /// of every event it completed, in arrival order.
    pub(crate) fn push(&mut self, chunk: &str) -> Vec<String> {
        self.pending.push_str(chunk);

        let mut events = Vec::new();
        while let Some(pos) = self.pending.find("\n\n") {
            let raw: String = self.pending.drain(..pos + 2).collect();
            if let Some(data) = extract_data(&raw) {
                events.push(data);
            }
        }

        events
    }

    /// Returns the data of a final unterminated event, if any.
    /// The stream is done at this point, nothing else will arrive.
    pub(crate) fn flush(&mut self) -> Option<String> {
        let raw = std::mem::take(&mut self.pending);
        extract_data(&raw)
    }
}

/// Joins the `data:` lines of one raw SSE event.
fn extract_data(raw: &str) -> Option<String> {
    let lines: Vec<&str> = raw
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|line| line.strip_prefix(' ').unwrap_or(line))
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_events_decode_in_order() {
        let mut buffer = EventBuffer::default();
        let events = buffer.push("data: {\"n\": 1}\n\ndata: {\"n\": 2}\n\n");
        assert_eq!(events, vec![r#"{"n": 1}"#, r#"{"n": 2}"#]);
        assert!(buffer.flush().is_none());
    }

    #[test]
    fn event_split_across_reads_is_reassembled() {
        let mut buffer = EventBuffer::default();
        assert!(buffer.push("data: {\"part\":").is_empty());
        let events = buffer.push(" \"two\"}\n\n");
        assert_eq!(events, vec![r#"{"part": "two"}"#]);
    }

    #[test]
    fn comment_and_blank_events_are_skipped() {
        let mut buffer = EventBuffer::default();
        let events = buffer.push(": keep-alive\n\ndata: {\"n\": 3}\n\n");
        assert_eq!(events, vec![r#"{"n": 3}"#]);
    }

    #[test]
    fn unterminated_final_event_is_flushed() {
        let mut buffer = EventBuffer::default();
        assert!(buffer.push("data: tail").is_empty());
        assert_eq!(buffer.flush().as_deref(), Some("tail"));
        assert!(buffer.flush().is_none());
    }
}
