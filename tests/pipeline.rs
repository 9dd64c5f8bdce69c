//! End-to-end behaviour of the merge → probe → notify pipeline.

use background_srcset::probe::ScriptedHost;
use background_srcset::resolver::ResolverState;
use background_srcset::InputName;

mod common;

#[tokio::test]
async fn test_scenario_a_synchronous_settlement() {
    let host = ScriptedHost::immediate(|_| "b.jpg".to_string());
    let (mut component, style) = common::component(&host);
    let mut changes = component.changes();
    component.initialize();

    component.apply_input_change(InputName::Src, Some("a.jpg".into()));
    assert_eq!(host.created(), 0);

    component.apply_input_change(InputName::SrcSet, Some("a.jpg 320w, b.jpg 640w".into()));
    let requests = host.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].src, "a.jpg");
    assert_eq!(requests[0].srcset, "a.jpg 320w, b.jpg 640w");
    assert_eq!(requests[0].sizes, "");

    assert!(common::next_change(&mut changes).await);
    assert_eq!(component.current_url().as_deref(), Some("b.jpg"));
    assert_eq!(style.get("background-image").as_deref(), Some("url(b.jpg)"));
    assert!(common::no_change(&mut changes).await);
}

#[tokio::test]
async fn test_scenario_b_async_settlement_falls_back_to_src() {
    let host = ScriptedHost::deferred();
    let (mut component, style) = common::component(&host);
    let mut changes = component.changes();
    component.initialize();

    component.apply_input_changes([
        (InputName::Src, Some("a.jpg".to_string())),
        (InputName::SrcSet, Some("a.jpg 1x, b.jpg 2x".to_string())),
        (InputName::Sizes, Some("50vw".to_string())),
    ]);
    assert_eq!(component.resolver_state(), ResolverState::Probing);
    assert!(common::no_change(&mut changes).await);
    assert_eq!(component.current_url(), None);

    assert!(host.settle(0, ""));
    assert!(common::next_change(&mut changes).await);
    assert_eq!(component.current_url().as_deref(), Some("a.jpg"));
    assert_eq!(style.get("background-image").as_deref(), Some("url(a.jpg)"));
    assert_eq!(component.resolver_state(), ResolverState::Settled);
    assert!(common::no_change(&mut changes).await);
}

#[tokio::test]
async fn test_scenario_c_teardown_while_pending() {
    let host = ScriptedHost::deferred();
    let (mut component, style) = common::component(&host);
    let mut changes = component.changes();
    component.initialize();
    common::submit_all(&mut component, "a.jpg", "a.jpg 1x");
    assert_eq!(host.created(), 1);

    component.dispose();
    host.settle(0, "b.jpg");

    assert!(common::no_change(&mut changes).await);
    assert_eq!(component.current_url(), None);
    assert_eq!(style.get("background-image"), None);
}

#[tokio::test]
async fn test_only_latest_probe_reports() {
    let host = ScriptedHost::deferred();
    let (mut component, _style) = common::component(&host);
    let mut changes = component.changes();
    component.initialize();

    common::submit_all(&mut component, "a.jpg", "a.jpg 1x");
    component.apply_input_change(InputName::SrcSet, Some("c.jpg 1x".into()));
    assert_eq!(host.created(), 2);

    // The first probe settles after being replaced.
    assert!(host.settle(0, "old.jpg"));
    assert!(common::no_change(&mut changes).await);
    assert_eq!(component.current_url(), None);

    assert!(host.settle(1, "c.jpg"));
    assert!(common::next_change(&mut changes).await);
    assert_eq!(component.current_url().as_deref(), Some("c.jpg"));
}

#[tokio::test]
async fn test_replaced_probe_settling_late_is_ignored() {
    let host = ScriptedHost::deferred();
    let (mut component, _style) = common::component(&host);
    let mut changes = component.changes();
    component.initialize();

    common::submit_all(&mut component, "a.jpg", "a.jpg 1x");
    component.apply_input_change(InputName::Src, Some("z.jpg".into()));

    assert!(host.settle(1, ""));
    assert!(common::next_change(&mut changes).await);
    assert_eq!(component.current_url().as_deref(), Some("z.jpg"));

    assert!(host.settle(0, "late.jpg"));
    assert!(common::no_change(&mut changes).await);
    assert_eq!(component.current_url().as_deref(), Some("z.jpg"));
}

#[tokio::test]
async fn test_same_url_raises_no_second_notification() {
    let host = ScriptedHost::deferred();
    let (mut component, _style) = common::component(&host);
    let mut changes = component.changes();
    component.initialize();

    common::submit_all(&mut component, "a.jpg", "a.jpg 1x, b.jpg 2x");
    host.settle(0, "b.jpg");
    assert!(common::next_change(&mut changes).await);

    // Same configuration re-submitted, negotiation lands on the same URL.
    component.apply_input_change(InputName::SrcSet, Some("a.jpg 1x, b.jpg 2x".into()));
    assert_eq!(host.created(), 2);
    host.settle(1, "b.jpg");
    assert!(common::no_change(&mut changes).await);

    // A genuinely different URL is reported again.
    component.apply_input_change(InputName::Sizes, Some("10vw".into()));
    host.settle(2, "a.jpg");
    assert!(common::next_change(&mut changes).await);
    assert_eq!(component.current_url().as_deref(), Some("a.jpg"));
}

#[tokio::test]
async fn test_malformed_list_keeps_previous_background() {
    let host = ScriptedHost::immediate(|request| {
        request.srcset.split_whitespace().next().unwrap_or_default().to_string()
    });
    let (mut component, style) = common::component(&host);
    let mut changes = component.changes();
    component.initialize();

    common::submit_all(&mut component, "a.jpg", "b.jpg 2x");
    assert!(common::next_change(&mut changes).await);

    component.apply_input_change(InputName::SrcSet, Some("c.jpg 320".into()));
    component.apply_input_change(InputName::SrcSet, Some("d.jpg".into()));
    assert_eq!(host.created(), 1);
    assert!(common::no_change(&mut changes).await);
    assert_eq!(style.get("background-image").as_deref(), Some("url(b.jpg)"));
}

#[tokio::test]
async fn test_never_settling_probe_leaves_style_untouched() {
    let host = ScriptedHost::deferred();
    let (mut component, style) = common::component(&host);
    let mut changes = component.changes();
    component.initialize();

    common::submit_all(&mut component, "a.jpg", "a.jpg 1x");
    assert!(common::no_change(&mut changes).await);
    assert_eq!(component.resolver_state(), ResolverState::Probing);
    assert_eq!(style.get("background-image"), None);
}

#[tokio::test]
async fn test_drop_acts_as_teardown() {
    let host = ScriptedHost::deferred();
    let (mut component, _style) = common::component(&host);
    let mut changes = component.changes();
    component.initialize();
    common::submit_all(&mut component, "a.jpg", "a.jpg 1x");

    drop(component);
    host.settle(0, "b.jpg");

    // Sender dropped with the component: the channel closes without a change.
    let result = tokio::time::timeout(std::time::Duration::from_secs(1), changes.recv()).await;
    assert!(matches!(result, Ok(Err(_))));
}
