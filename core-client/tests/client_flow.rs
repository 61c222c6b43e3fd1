//! End-to-end flows through `SheetClient` against hand-written host fakes.

mod support;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use bridge_traits::{error::BridgeError, ToastDuration};
use core_client::{
    ApiResponse, ErrorKind, TablePayload, UploadFile, UploadProgress, DEFAULT_WEB_API_URL,
    MOBILE_API_CANDIDATES, REQUEST_TIMEOUT,
};
use serde_json::{json, Value};
use support::*;

#[tokio::test]
async fn test_offline_device_never_dispatches() {
    let host = NativeHost::new(false);
    let http = ScriptedHttp::json(200, table_body());
    let client = host.client(http.clone());

    let err = client.get_data().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoConnectivity);
    assert_eq!(err.to_string(), "No internet connection");

    let err = client
        .upload_file(UploadFile::new("sales.csv", &b"a,b\n1,2\n"[..]), None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoConnectivity);

    assert_eq!(http.calls(), 0);

    settle().await;
    assert!(host
        .notifier
        .shown()
        .contains(&("No internet connection".to_string(), ToastDuration::Long)));
}

#[tokio::test]
async fn test_web_mode_skips_connectivity_and_toasts() {
    let downloader = Arc::new(CountingDownloader::default());
    let http = ScriptedHttp::json(200, table_body());
    let client = web_client(http.clone(), downloader);

    let info = client.platform_info();
    assert!(!info.is_mobile);
    assert_eq!(info.api_base_url, DEFAULT_WEB_API_URL);
    assert!(client.check_connectivity().await);

    let response = client.get_data().await.unwrap();
    assert_eq!(response.data().unwrap().row_count, 1);
    assert_eq!(http.last_url().unwrap(), "http://localhost:5000/api/data");
}

#[tokio::test]
async fn test_mobile_uses_first_candidate() {
    let host = NativeHost::new(true);
    let http = ScriptedHttp::json(200, table_body());
    let client = host.client(http.clone());

    let info = client.platform_info();
    assert!(info.is_mobile);
    assert_eq!(info.api_base_url, MOBILE_API_CANDIDATES[0]);

    client.get_data().await.unwrap();
    assert_eq!(
        http.last_url().unwrap(),
        format!("{}/data", MOBILE_API_CANDIDATES[0])
    );
    assert_eq!(host.monitor.queries(), 1);
}

#[tokio::test]
async fn test_failure_reason_prefers_error_over_message() {
    let downloader = Arc::new(CountingDownloader::default());
    let http = ScriptedHttp::json(
        400,
        json!({ "success": false, "error": "Invalid column", "message": "Update rejected" }),
    );
    let client = web_client(http, downloader.clone());

    let err = client.update_cell(3, "Price", 12.5).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ServerError);
    assert_eq!(err.to_string(), "Invalid column");

    let http = ScriptedHttp::json(500, json!({ "success": false, "message": "Disk full" }));
    let err = web_client(http, downloader.clone())
        .get_data()
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Disk full");

    let http = ScriptedHttp::json(502, json!({}));
    let err = web_client(http, downloader).get_data().await.unwrap_err();
    assert_eq!(err.to_string(), "Server error");
}

#[tokio::test]
async fn test_declined_ai_command_is_not_an_error() {
    let host = NativeHost::new(true);
    let http = ScriptedHttp::json(
        200,
        json!({ "success": false, "error": "Column 'Foo' not found", "message": "ignored" }),
    );
    let client = host.client(http.clone());

    let response = client.process_ai_command("  sum column Foo  ").await.unwrap();
    assert!(!response.is_success());
    assert_eq!(response.failure_reason().as_deref(), Some("Column 'Foo' not found"));

    let sent = http.last_request().unwrap();
    let body: Value = match sent.body.unwrap() {
        bridge_traits::HttpBody::Bytes(bytes) => serde_json::from_slice(&bytes).unwrap(),
        other => panic!("unexpected body {:?}", other),
    };
    assert_eq!(body, json!({ "command": "sum column Foo" }));

    settle().await;
    let texts = host.notifier.texts();
    assert!(texts.contains(&"Processing AI command...".to_string()));
    assert!(!texts.contains(&"AI command executed!".to_string()));
}

#[tokio::test]
async fn test_ai_command_refresh_payload() {
    let host = NativeHost::new(true);
    let mut body = table_body();
    body["operation"] = json!("add_column");
    body["refresh_needed"] = json!(true);
    let client = host.client(ScriptedHttp::json(200, body));

    let response: ApiResponse<TablePayload> =
        client.process_ai_command("add column Total").await.unwrap();
    assert!(response.refresh_needed());
    assert_eq!(response.operation(), Some("add_column"));
    assert_eq!(response.data().unwrap().columns.len(), 2);

    settle().await;
    assert!(host.notifier.texts().contains(&"AI command executed!".to_string()));
}

#[tokio::test]
async fn test_update_cell_body_and_toast() {
    let host = NativeHost::new(true);
    let http = ScriptedHttp::json(200, json!({ "success": true, "message": "Cell updated" }));
    let client = host.client(http.clone());

    let response = client.update_cell(0, "Name", "Bob").await.unwrap();
    assert_eq!(response.message(), Some("Cell updated"));

    let sent = http.last_request().unwrap();
    assert!(sent.url.ends_with("/update-cell"));
    let body: Value = match sent.body.unwrap() {
        bridge_traits::HttpBody::Bytes(bytes) => serde_json::from_slice(&bytes).unwrap(),
        other => panic!("unexpected body {:?}", other),
    };
    assert_eq!(body, json!({ "rowId": 0, "column": "Name", "value": "Bob" }));

    settle().await;
    assert_eq!(
        host.notifier.shown(),
        vec![("Cell updated".to_string(), ToastDuration::Short)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_unanswered_request_times_out_after_thirty_seconds() {
    let downloader = Arc::new(CountingDownloader::default());
    let client = web_client(Arc::new(NeverResponds), downloader);

    let started = tokio::time::Instant::now();
    let err = client.get_status().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert_eq!(
        err.to_string(),
        "Timeout - the server is taking too long to respond"
    );
    let waited = started.elapsed();
    assert!(waited >= REQUEST_TIMEOUT);
    assert!(waited < REQUEST_TIMEOUT + Duration::from_secs(1));
}

#[tokio::test]
async fn test_no_response_message_depends_on_mode() {
    let downloader = Arc::new(CountingDownloader::default());
    let http = ScriptedHttp::failing(|| BridgeError::NoResponse("connection refused".into()));
    let err = web_client(http, downloader).get_data().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoResponse);
    assert!(err.to_string().contains("backend is running"));

    let host = NativeHost::new(true);
    let http = ScriptedHttp::failing(|| BridgeError::NoResponse("connection refused".into()));
    let err = host.client(http).get_data().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoResponse);
    assert!(err.to_string().contains("Check your connection"));
}

#[tokio::test]
async fn test_connection_lost_mid_request_reports_offline() {
    let host = NativeHost::new(true);
    let monitor = host.monitor.clone();
    let http = ScriptedHttp::new(move |_| {
        monitor.set_online(false);
        Err(BridgeError::NoResponse("network unreachable".into()))
    });
    let client = host.client(http.clone());

    let err = client.get_data().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoConnectivity);
    assert_eq!(http.calls(), 1);
    assert_eq!(host.monitor.queries(), 2);
}

#[tokio::test]
async fn test_upload_reports_progress() {
    let host = NativeHost::new(true);
    let http = ScriptedHttp::new(|request| {
        let progress = request.progress.clone().expect("progress callback");
        progress.report(0, 0);
        progress.report(512, 1024);
        progress.report(1024, 1024);
        Ok(json_response(200, &table_body()))
    });
    let client = host.client(http.clone());

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let progress = UploadProgress::new(move |percent| sink.lock().unwrap().push(percent));

    let response = client
        .upload_file(
            UploadFile::new("sales.xlsx", vec![0u8; 1024]),
            Some(progress),
        )
        .await
        .unwrap();
    assert_eq!(response.data().unwrap().col_count, 2);
    assert_eq!(*seen.lock().unwrap(), vec![50, 100]);

    match http.last_request().unwrap().body.unwrap() {
        bridge_traits::HttpBody::Multipart(file) => {
            assert_eq!(file.field_name, "file");
            assert_eq!(file.file_name, "sales.xlsx");
        }
        other => panic!("unexpected body {:?}", other),
    }

    settle().await;
    let texts = host.notifier.texts();
    assert!(texts.contains(&"Upload: 50%".to_string()));
    assert!(texts.contains(&"File uploaded successfully!".to_string()));
}

#[tokio::test]
async fn test_panicking_progress_listener_does_not_fail_upload() {
    let downloader = Arc::new(CountingDownloader::default());
    let http = ScriptedHttp::new(|request| {
        if let Some(progress) = &request.progress {
            progress.report(10, 10);
        }
        Ok(json_response(200, &table_body()))
    });
    let client = web_client(http, downloader);

    let progress = UploadProgress::new(|_| panic!("listener bug"));
    let response = client
        .upload_file(UploadFile::new("sales.csv", &b"a\n"[..]), Some(progress))
        .await;
    assert!(response.is_ok());
}

#[tokio::test]
async fn test_broken_notifier_changes_nothing() {
    let host = NativeHost::new(true);
    let notifier = Arc::new(BrokenNotifier::default());
    let http = ScriptedHttp::json(200, json!({ "success": true, "message": "Cell updated" }));
    let client = host.client_with_notifier(http.clone(), notifier.clone());

    let response = client.update_cell(1, "Price", 5).await.unwrap();
    assert!(response.is_success());

    let http_offline = ScriptedHttp::json(200, table_body());
    host.monitor.set_online(false);
    let offline = host.client_with_notifier(http_offline.clone(), notifier.clone());
    let err = offline.get_data().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoConnectivity);
    assert_eq!(http_offline.calls(), 0);

    settle().await;
    assert!(notifier.attempts() >= 2);
}

#[tokio::test]
async fn test_connection_probe() {
    let downloader = Arc::new(CountingDownloader::default());
    let healthy = ScriptedHttp::json(
        200,
        json!({
            "status": "healthy",
            "has_data": true,
            "current_file": "sales.xlsx",
            "timestamp": "2024-05-01T10:00:00"
        }),
    );
    let client = web_client(healthy, downloader.clone());
    assert!(client.test_connection().await);

    let status = client.get_status().await.unwrap();
    let status = status.into_data().unwrap();
    assert!(status.has_data);
    assert_eq!(status.current_file.as_deref(), Some("sales.xlsx"));

    let down = ScriptedHttp::failing(|| BridgeError::NoResponse("refused".into()));
    assert!(!web_client(down, downloader).test_connection().await);

    let host = NativeHost::new(false);
    let http = ScriptedHttp::json(200, json!({}));
    assert!(!host.client(http.clone()).test_connection().await);
    assert_eq!(http.calls(), 0);
}
