use crate::browser::Browser;
use crate::error::BrowserError;
use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use std::time::Duration;

/// Ports WebDriver servers commonly listen on, tried when the configured URL fails
const FALLBACK_URLS: [&str; 4] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4723", // Appium default
    "http://localhost:9222", // Chrome debug port default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// [`Browser`] backed by a fantoccini WebDriver session
pub struct WebDriverBrowser {
    client: Client,
}

impl WebDriverBrowser {
    /// Wrap an already connected client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connects to the WebDriver instance, falling back to common local ports
    pub async fn connect(webdriver_url: &str) -> Result<Self, BrowserError> {
        let first_error = match ClientBuilder::native().connect(webdriver_url).await {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", webdriver_url);
                return Ok(Self::new(client));
            }
            Err(e) => {
                ::log::error!(
                    "Failed to connect to WebDriver at {}: {}",
                    webdriver_url,
                    e
                );
                e
            }
        };

        for url in FALLBACK_URLS.iter() {
            if *url == webdriver_url {
                continue;
            }

            ::log::info!("Trying fallback WebDriver URL: {}", url);
            if let Ok(client) = ClientBuilder::native().connect(url).await {
                ::log::debug!("Connected to fallback WebDriver at {}", url);
                return Ok(Self::new(client));
            }
        }

        ::log::error!(
            "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
        );
        Err(first_error.into())
    }

    /// End the WebDriver session
    pub async fn close(self) -> Result<(), BrowserError> {
        self.client.close().await?;
        Ok(())
    }
}

/// Turns a lookup miss into `None`, keeping every other failure
fn optional<T>(result: Result<T, CmdError>) -> Result<Option<T>, BrowserError> {
    match result {
        Ok(found) => Ok(Some(found)),
        Err(e) if e.is_no_such_element() => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl Browser for WebDriverBrowser {
    type Element = Element;

    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        self.client
            .goto(url)
            .await
            .map_err(|e| BrowserError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }

    async fn current_url(&mut self) -> Result<String, BrowserError> {
        Ok(self.client.current_url().await?.to_string())
    }

    async fn wait_until_present(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Element, BrowserError> {
        self.client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selector))
            .await
            .map_err(|e| match e {
                CmdError::WaitTimeout => BrowserError::Timeout {
                    selector: selector.to_string(),
                    timeout,
                },
                other => other.into(),
            })
    }

    async fn find(&mut self, selector: &str) -> Result<Option<Element>, BrowserError> {
        optional(self.client.find(Locator::Css(selector)).await)
    }

    async fn find_all(&mut self, selector: &str) -> Result<Vec<Element>, BrowserError> {
        Ok(self.client.find_all(Locator::Css(selector)).await?)
    }

    async fn find_in(
        &mut self,
        scope: &Element,
        selector: &str,
    ) -> Result<Option<Element>, BrowserError> {
        optional(scope.find(Locator::Css(selector)).await)
    }

    async fn find_all_in(
        &mut self,
        scope: &Element,
        selector: &str,
    ) -> Result<Vec<Element>, BrowserError> {
        Ok(scope.find_all(Locator::Css(selector)).await?)
    }

    async fn click(&mut self, element: &Element) -> Result<(), BrowserError> {
        // Dispatched as a script click, not a native pointer event
        let target = serde_json::to_value(element)?;
        self.client
            .execute("arguments[0].click();", vec![target])
            .await?;
        Ok(())
    }

    async fn read_text(&mut self, element: &Element) -> Result<String, BrowserError> {
        Ok(element.text().await?)
    }

    async fn read_attribute(
        &mut self,
        element: &Element,
        name: &str,
    ) -> Result<Option<String>, BrowserError> {
        // Property first so `href` comes back absolute, then the raw attribute
        if let Some(value) = element.prop(name).await? {
            return Ok(Some(value));
        }
        Ok(element.attr(name).await?)
    }
}
