//! This module provides functionality for downloading a GeoPackage from an HTTP endpoint.
//!
//! `DataReaderHttp` fetches the whole body of an `http` or `https` URL using `reqwest`.
//! Connection, timeout and body errors are retried with exponential backoff; any other error,
//! and any non-success status code, fails the read.
//!
//! # Examples
//!
//! ```rust,no_run
//! use gpkg_core::io::{DataReaderHttp, DataReaderTrait};
//! use anyhow::Result;
//! use reqwest::Url;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let url = Url::parse("https://example.com/rivers.gpkg")?;
//!     let reader = DataReaderHttp::from_url(url)?;
//!     let data = reader.read_all().await?;
//!     println!("Read {} bytes", data.len());
//!     Ok(())
//! }
//! ```

use super::{DataReader, DataReaderTrait};
use crate::Blob;
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tokio::time::sleep;

/// A struct that provides reading capabilities from an HTTP(S) endpoint.
#[derive(Debug)]
pub struct DataReaderHttp {
	client: Client,
	name: String,
	url: Url,
	retry_delay: Duration,
}

impl DataReaderHttp {
	/// Creates a `DataReaderHttp` from a URL.
	///
	/// # Errors
	/// Returns an error if the scheme is neither `http` nor `https`.
	pub fn from_url(url: Url) -> Result<DataReader> {
		Ok(Box::new(DataReaderHttp::new(url)?))
	}

	fn new(url: Url) -> Result<DataReaderHttp> {
		match url.scheme() {
			"http" | "https" => (),
			other => bail!("unsupported URL scheme '{other}' in '{url}', expected 'http' or 'https'"),
		}

		let client = Client::builder().tcp_keepalive(Duration::from_secs(600)).build()?;

		Ok(DataReaderHttp {
			client,
			name: url.to_string(),
			url,
			retry_delay: RETRY_DELAY,
		})
	}
}

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(1);

fn is_retryable_error(err: &reqwest::Error) -> bool {
	err.is_connect() || err.is_timeout() || err.is_body()
}

#[async_trait]
impl DataReaderTrait for DataReaderHttp {
	async fn read_all(&self) -> Result<Blob> {
		for attempt in 0..=MAX_RETRIES {
			if attempt > 0 {
				let backoff = self.retry_delay * (1 << (attempt - 1));
				log::warn!(
					"retry attempt {attempt}/{MAX_RETRIES} reading from '{}', waiting {backoff:?}",
					self.url
				);
				sleep(backoff).await;
			}

			let response = match self.client.get(self.url.clone()).send().await {
				Ok(r) => r,
				Err(e) if is_retryable_error(&e) && attempt < MAX_RETRIES => {
					log::warn!("retryable error: {e}");
					continue;
				}
				Err(e) => {
					return Err(e).with_context(|| {
						format!("requesting '{}' (attempt {}/{})", self.url, attempt + 1, MAX_RETRIES + 1)
					});
				}
			};

			if !response.status().is_success() {
				bail!("HTTP request to '{}' failed with status {}", self.url, response.status());
			}

			let bytes = match response.bytes().await {
				Ok(b) => b,
				Err(e) if is_retryable_error(&e) && attempt < MAX_RETRIES => {
					log::warn!("retryable error reading response body: {e}");
					continue;
				}
				Err(e) => {
					return Err(e).with_context(|| {
						format!("reading body of '{}' (attempt {}/{})", self.url, attempt + 1, MAX_RETRIES + 1)
					});
				}
			};

			log::debug!("downloaded {} bytes from '{}'", bytes.len(), self.url);
			return Ok(Blob::from(&*bytes));
		}

		bail!("request to '{}' failed after {MAX_RETRIES} retries", self.url)
	}

	fn get_name(&self) -> &str {
		&self.name
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	};
	use tokio::{
		io::{AsyncReadExt, AsyncWriteExt},
		net::TcpListener,
	};

	fn local_reader(url: Url) -> Result<DataReaderHttp> {
		let mut reader = DataReaderHttp::new(url)?;
		reader.client = Client::builder().no_proxy().build()?;
		reader.retry_delay = Duration::from_millis(1);
		Ok(reader)
	}

	/// Answers every connection with `response` and counts the connections.
	async fn serve(response: &'static str) -> Result<(Url, Arc<AtomicUsize>)> {
		let listener = TcpListener::bind("127.0.0.1:0").await?;
		let url = Url::parse(&format!("http://{}/rivers.gpkg", listener.local_addr()?))?;
		let connections = Arc::new(AtomicUsize::new(0));
		let counter = connections.clone();
		tokio::spawn(async move {
			while let Ok((mut socket, _)) = listener.accept().await {
				counter.fetch_add(1, Ordering::SeqCst);
				let mut request = [0u8; 4096];
				let _ = socket.read(&mut request).await;
				let _ = socket.write_all(response.as_bytes()).await;
				let _ = socket.shutdown().await;
			}
		});
		Ok((url, connections))
	}

	#[test]
	fn from_url_checks_scheme() {
		let valid_url = Url::parse("https://www.example.com/a.gpkg").unwrap();
		let invalid_url = Url::parse("ftp://www.example.com/a.gpkg").unwrap();

		assert!(DataReaderHttp::from_url(valid_url).is_ok());
		assert_eq!(
			DataReaderHttp::from_url(invalid_url).unwrap_err().to_string(),
			"unsupported URL scheme 'ftp' in 'ftp://www.example.com/a.gpkg', expected 'http' or 'https'"
		);
	}

	#[test]
	fn get_name() -> Result<()> {
		let url = "https://www.example.com/rivers.gpkg";
		let reader = DataReaderHttp::from_url(Url::parse(url)?)?;
		assert_eq!(reader.get_name(), url);
		Ok(())
	}

	#[tokio::test]
	async fn reads_the_body() -> Result<()> {
		let (url, connections) =
			serve("HTTP/1.1 200 OK\r\nContent-Length: 4\r\nConnection: close\r\n\r\nGPKG").await?;

		let blob = local_reader(url)?.read_all().await?;
		assert_eq!(blob.as_slice(), b"GPKG");
		assert_eq!(connections.load(Ordering::SeqCst), 1);
		Ok(())
	}

	#[tokio::test]
	async fn rejects_error_status_without_retrying() -> Result<()> {
		let (url, connections) =
			serve("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").await?;

		let error = local_reader(url.clone())?.read_all().await.unwrap_err();
		assert_eq!(
			error.to_string(),
			format!("HTTP request to '{url}' failed with status 404 Not Found")
		);
		assert_eq!(connections.load(Ordering::SeqCst), 1);
		Ok(())
	}

	#[tokio::test]
	async fn retries_refused_connections() -> Result<()> {
		let listener = TcpListener::bind("127.0.0.1:0").await?;
		let url = Url::parse(&format!("http://{}/rivers.gpkg", listener.local_addr()?))?;
		drop(listener);

		let error = local_reader(url.clone())?.read_all().await.unwrap_err();
		assert_eq!(error.to_string(), format!("requesting '{url}' (attempt 4/4)"));
		Ok(())
	}
}
