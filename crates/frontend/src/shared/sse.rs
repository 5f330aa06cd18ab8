//! Server-sent events stream on top of the browser `EventSource`.
//!
//! Each message carries one JSON document in its `data` field. Messages
//! that fail to decode are logged and skipped; the connection stays open.

use serde::de::DeserializeOwned;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{EventSource, MessageEvent};

use super::http::ApiError;
use super::listener::Listener;

/// Decode the `data` payload of one event
pub fn decode_event<T: DeserializeOwned>(data: &str) -> Result<T, ApiError> {
    serde_json::from_str(data.trim()).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Open `EventSource`; closed on drop
pub struct EventStream {
    source: EventSource,
    url: String,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_error: Closure<dyn FnMut(web_sys::Event)>,
}

impl EventStream {
    /// Connect to `url`; decoded items go to `on_item`, connection errors to `on_error`
    pub fn open<T, L, E>(url: &str, on_item: L, on_error: E) -> Result<Self, ApiError>
    where
        T: DeserializeOwned + 'static,
        L: Listener<T> + 'static,
        E: Listener<String> + 'static,
    {
        let source = EventSource::new(url)
            .map_err(|e| ApiError::Network(format!("Failed to open event stream: {:?}", e)))?;

        let stream_url = url.to_string();
        let on_message = Closure::wrap(Box::new(move |event: MessageEvent| {
            let Some(data) = event.data().as_string() else {
                log::warn!("{}: non-text event skipped", stream_url);
                return;
            };
            match decode_event::<T>(&data) {
                Ok(item) => on_item.emit(item),
                Err(e) => log::warn!("{}: {}", stream_url, e),
            }
        }) as Box<dyn FnMut(MessageEvent)>);

        let error_url = url.to_string();
        let on_error_cb = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            log::error!("{}: event stream error", error_url);
            on_error.emit(format!("Event stream error: {}", error_url));
        }) as Box<dyn FnMut(web_sys::Event)>);

        source.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        source.set_onerror(Some(on_error_cb.as_ref().unchecked_ref()));
        log::debug!("event stream opened: {}", url);

        Ok(Self {
            source,
            url: url.to_string(),
            _on_message: on_message,
            _on_error: on_error_cb,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Stop receiving events; handlers stay alive until drop
    pub fn close(&self) {
        self.source.set_onmessage(None);
        self.source.set_onerror(None);
        self.source.close();
    }
}

impl Drop for EventStream {
    fn drop(&mut self) {
        self.close();
        log::debug!("event stream closed: {}", self.url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Tick {
        processed: u32,
    }

    #[test]
    fn test_decode_event() {
        let tick: Tick = decode_event(" {\"processed\": 3}\n").unwrap();
        assert_eq!(tick, Tick { processed: 3 });
    }

    #[test]
    fn test_decode_event_error_is_decode() {
        let err = decode_event::<Tick>("not json").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
