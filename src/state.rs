//! Application state: word catalog, submission store, dictionary client,
//! session form cache, and the feedback notifier.
//!
//! The store lives behind a single async mutex so every save runs its
//! load-mutate-persist cycle alone; two rapid saves can never clobber each
//! other with stale reads.
//!
//! The form cache is per word and lives for the process: a word's dictionary
//! entry does not change within the app's lifetime, so successful (and
//! not-found) lookups are kept, while transient failures stay uncached and
//! get retried on the next request.

use std::collections::HashMap;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, instrument, warn};

use crate::catalog::WordCatalog;
use crate::config::load_app_config_from_env;
use crate::dictionary::{self, Dictionary, DictionaryError};
use crate::domain::UNTITLED;
use crate::feedback::FeedbackNotifier;
use crate::store::SubmissionStore;

pub struct AppState {
    pub catalog: WordCatalog,
    pub store: Mutex<SubmissionStore>,
    pub dictionary: Option<Dictionary>,
    pub forms_cache: RwLock<HashMap<String, Vec<String>>>,
    pub notifier: Option<FeedbackNotifier>,
}

impl AppState {
    /// Build state from env: load config, pick the word bank, open the
    /// store, and construct the outbound clients.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_app_config_from_env();

        let catalog = cfg
            .as_ref()
            .filter(|c| !c.words.is_empty())
            .and_then(|c| match WordCatalog::from_bank(c.words.clone()) {
                Some(cat) => {
                    info!(target: "words", size = cat.len(), "Using config word bank");
                    Some(cat)
                }
                None => {
                    error!(target: "words", "Config word bank rejected (too small or duplicated); keeping built-in list");
                    None
                }
            })
            .unwrap_or_else(WordCatalog::builtin);

        let untitled_label = cfg
            .as_ref()
            .and_then(|c| c.untitled_label.clone())
            .unwrap_or_else(|| UNTITLED.to_string());

        let data_path =
            std::env::var("DATA_PATH").unwrap_or_else(|_| "./data/story40.json".into());
        let store = SubmissionStore::open(&data_path, untitled_label);

        let dictionary = Dictionary::from_env();
        if let Some(d) = &dictionary {
            info!(target: "story40_backend", base_url = %d.base_url, "Dictionary lookups enabled");
        } else {
            warn!(target: "story40_backend", "Dictionary client unavailable; matching degrades to exact base words");
        }

        let notifier = FeedbackNotifier::from_env();
        if notifier.is_some() {
            info!(target: "story40_backend", "Feedback relay enabled");
        } else {
            info!(target: "story40_backend", "Feedback relay disabled (no FEEDBACK_WEBHOOK_URL)");
        }

        Self {
            catalog,
            store: Mutex::new(store),
            dictionary,
            forms_cache: RwLock::new(HashMap::new()),
            notifier,
        }
    }

    /// Allowed forms for a whole challenge-word set. Cache hits are served
    /// directly; the rest are fetched in parallel (each word's lookup is
    /// independent). Any failed lookup degrades that word to base-word-only.
    #[instrument(level = "debug", skip(self), fields(words = words.len()))]
    pub async fn forms_for(&self, words: &[String]) -> HashMap<String, Vec<String>> {
        let mut out: HashMap<String, Vec<String>> = HashMap::new();
        let mut missing: Vec<String> = Vec::new();
        {
            let cache = self.forms_cache.read().await;
            for w in words {
                if let Some(forms) = cache.get(w) {
                    out.insert(w.clone(), forms.clone());
                } else if !missing.contains(w) {
                    missing.push(w.clone());
                }
            }
        }
        if missing.is_empty() {
            return out;
        }

        let Some(dict) = &self.dictionary else {
            for w in missing {
                out.insert(w.clone(), vec![w]);
            }
            return out;
        };

        let mut lookups = tokio::task::JoinSet::new();
        for w in missing {
            let dict = dict.clone();
            lookups.spawn(async move {
                let result = dict.fetch_entry(&w).await;
                (w, result)
            });
        }

        while let Some(joined) = lookups.join_next().await {
            let Ok((word, result)) = joined else { continue };
            match result {
                Ok(entry) => {
                    let forms = dictionary::allowed_forms(&word, &entry);
                    self.forms_cache.write().await.insert(word.clone(), forms.clone());
                    out.insert(word, forms);
                }
                Err(DictionaryError::NotFound) => {
                    debug!(target: "words", %word, "No dictionary entry; caching base word only");
                    let base = vec![word.clone()];
                    self.forms_cache.write().await.insert(word.clone(), base.clone());
                    out.insert(word, base);
                }
                Err(e) => {
                    warn!(target: "words", %word, error = %e, "Form lookup failed; degrading to base word");
                    out.insert(word.clone(), vec![word]);
                }
            }
        }
        out
    }

    /// Allowed forms for a single word, same cache and degradation rules.
    pub async fn allowed_forms(&self, word: &str) -> Vec<String> {
        let key = word.to_string();
        let mut map = self.forms_for(std::slice::from_ref(&key)).await;
        map.remove(&key).unwrap_or_else(|| vec![key])
    }
}
