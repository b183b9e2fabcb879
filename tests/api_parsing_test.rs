use buying_assistant::{
    extract_products_from_text, ApprovalRequest, ApprovalResponse, SubmitRequest, SubmitResponse,
};
use serde_json::json;

#[test]
fn test_submit_request_wire_shape() {
    let request = SubmitRequest {
        input: "800".to_string(),
        session_id: "2c8f5a52-7f3e-4d1c-9b8a-1f0e2d3c4b5a".to_string(),
        current_slot: Some("budget".to_string()),
    };

    let body = serde_json::to_value(&request).expect("Failed to serialize request");
    assert_eq!(
        body,
        json!({
            "input": "800",
            "session_id": "2c8f5a52-7f3e-4d1c-9b8a-1f0e2d3c4b5a",
            "current_slot": "budget"
        })
    );

    let approval = serde_json::to_value(ApprovalRequest {
        session_id: "abc".to_string(),
    })
    .unwrap();
    assert_eq!(approval, json!({"session_id": "abc"}));
}

#[test]
fn test_full_recommendation_response_parsing() {
    // Shape produced by the backend once every slot is filled
    let table = "| Title | Price | Match Score | Link | Availability | Delivery Time | Category |\n\
                 |-------|-------|-------------|------|--------------|---------------|---------|\n\
                 | Business Laptop 003-2 | $742.18 | 9.47 | [View](https://example.com/product/placeholder) | In Stock | 3-5 days | Laptops |\n";
    let response_json = json!({
        "response": format!("Thank you! Here are some options for a laptop for college work with a budget of $800.00:\n\n{}", table),
        "current_slot": null,
        "history": [
            {
                "user": "I need a laptop for college work under $800",
                "bot": "Do you have any brand preferences?",
                "intent": "purchase_request",
                "context": {"item": "laptop", "budget": 800.0, "purpose": "college work", "brand": null, "features": null, "urgency": null}
            }
        ],
        "context": {"item": "laptop", "budget": 800.0, "purpose": "college work", "brand": "any", "features": "touchscreen", "urgency": "soon"},
        "best_product": {
            "title": "Business Laptop 003-2",
            "price": 742.18,
            "description": "Business Laptop touchscreen",
            "availability": "In Stock",
            "delivery_time": "3-5 days",
            "category": "Laptops",
            "link": "https://example.com/product/placeholder",
            "product_id": "5f6b1c1e-0d8e-4f5a-8c6a-2b9e7d4a1c3f",
            "match_score": 9.47
        },
        "passes_policy": false,
        "policy_reason": "Price exceeds company policy limit ($500).",
        "products": [
            {
                "title": "Business Laptop 003-2",
                "price": 742.18,
                "description": "Business Laptop touchscreen",
                "availability": "In Stock",
                "delivery_time": "3-5 days",
                "category": "Laptops",
                "link": "https://example.com/product/placeholder",
                "product_id": "5f6b1c1e-0d8e-4f5a-8c6a-2b9e7d4a1c3f",
                "match_score": 9.47
            }
        ]
    });

    let response: SubmitResponse =
        serde_json::from_value(response_json).expect("Failed to parse response");

    assert!(response.current_slot.is_none());
    let best = response.best_product.as_ref().expect("best product");
    assert_eq!(best.title, "Business Laptop 003-2");
    assert_eq!(best.product_id.as_deref(), Some("5f6b1c1e-0d8e-4f5a-8c6a-2b9e7d4a1c3f"));

    let verdict = response.verdict().expect("verdict");
    assert!(!verdict.passes);

    let history = response.history.as_ref().expect("history");
    assert_eq!(history[0].context.as_ref().unwrap().brand, None);

    // The embedded table agrees with the structured list
    let scraped = extract_products_from_text(&response.response);
    let structured = response.products.as_ref().unwrap();
    assert_eq!(scraped.len(), structured.len());
    assert_eq!(scraped[0].title, structured[0].title);
    assert_eq!(scraped[0].price, structured[0].price);
    assert_eq!(scraped[0].match_score, structured[0].match_score);
}

#[test]
fn test_minimal_response_parsing() {
    let response: SubmitResponse = serde_json::from_value(json!({
        "response": "I still need the item you're looking for and your budget to show suggestions."
    }))
    .expect("Failed to parse response");

    assert!(response.current_slot.is_none());
    assert!(response.context.is_none());
    assert!(response.products.is_none());
    assert!(response.history.is_none());
    assert!(response.intent.is_none());
}

#[test]
fn test_response_without_reply_text_is_rejected() {
    let result = serde_json::from_value::<SubmitResponse>(json!({"current_slot": "budget"}));
    assert!(result.is_err());
}

#[test]
fn test_approval_response_parsing() {
    let response: ApprovalResponse = serde_json::from_value(json!({
        "mailto_link": "https://mail.google.com/mail/?view=cm&fs=1&to=approver@example.com&su=Approval%20Request%3A%20Gaming%20Laptop%20002-1&body=%0A%20%20%20%20Product%20Approval%20Request"
    }))
    .expect("Failed to parse approval response");

    assert!(response.mailto_link.starts_with("https://mail.google.com/"));
    assert_eq!(
        response.subject().as_deref(),
        Some("Approval Request: Gaming Laptop 002-1")
    );
}
