mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::{eiffel_tower, test_app, TestClient};

#[tokio::test]
async fn place_lifecycle_end_to_end() -> Result<()> {
    let app = test_app(false);
    let mut client = TestClient::new(&app);

    let res = client.post("/addplace", eiffel_tower()).await?;
    assert_eq!(res.status, StatusCode::CREATED, "body: {}", res.text);
    let place = &res.body["place"];
    let id = place["_id"].as_str().expect("id").to_string();
    assert_eq!(place["placeName"], "Eiffel Tower");
    assert_eq!(place["cityName"], "");
    assert_eq!(place["stateName"], "");
    assert_eq!(place["arrivalDate"], "2024-05-01");

    let res = client.get("/getplaces?countryName=fra").await?;
    assert_eq!(res.status, StatusCode::OK);
    let places = res.body["places"].as_array().expect("places array");
    assert_eq!(places.len(), 1);
    assert_eq!(places[0]["_id"], id.as_str());

    let res = client.get(&format!("/getplace/{}", id)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["place"]["placeName"], "Eiffel Tower");

    let res = client.patch(&format!("/editplace/{}", id), json!({ "cityName": "Paris" })).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["place"]["cityName"], "Paris");
    assert_eq!(res.body["place"]["placeName"], "Eiffel Tower");

    let res = client.delete(&format!("/deleteplace/{}", id)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["placeToBeDeleted"]["_id"], id.as_str());
    assert_eq!(res.body["placeToBeDeleted"]["cityName"], "Paris");

    let res = client.get(&format!("/getplace/{}", id)).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["error"], "Place does not exist");

    let res = client.get("/getplaces").await?;
    assert_eq!(res.body["places"], json!([]));

    Ok(())
}

#[tokio::test]
async fn missing_required_fields_are_rejected() -> Result<()> {
    let app = test_app(false);
    let mut client = TestClient::new(&app);

    let res = client.post("/addplace", json!({ "cityName": "Paris" })).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
    assert_eq!(res.body["field_errors"]["placeName"], "Please provide a place name");
    assert!(res.body["field_errors"].get("countryName").is_some());

    let res = client.get("/getplaces").await?;
    assert_eq!(res.body["places"], json!([]), "nothing may be stored after a failed add");

    Ok(())
}

#[tokio::test]
async fn patch_blanking_required_field_leaves_record_unchanged() -> Result<()> {
    let app = test_app(false);
    let mut client = TestClient::new(&app);

    let place = client.add_place(eiffel_tower()).await?;
    let id = place["_id"].as_str().expect("id");

    let res = client
        .patch(&format!("/editplace/{}", id), json!({ "placeName": "", "cityName": "Lyon" }))
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["field_errors"].get("placeName").is_some());

    let res = client.get(&format!("/getplace/{}", id)).await?;
    assert_eq!(res.body["place"], place);

    Ok(())
}

#[tokio::test]
async fn unknown_and_malformed_ids_are_not_found() -> Result<()> {
    let app = test_app(false);
    let mut client = TestClient::new(&app);
    let missing = "0b0f1d3c-8a2e-4c55-9a57-3c1f2b0e4d11";

    for uri in [format!("/getplace/{}", missing), "/getplace/not-a-uuid".to_string()] {
        let res = client.get(&uri).await?;
        assert_eq!(res.status, StatusCode::NOT_FOUND, "GET {}", uri);
        assert_eq!(res.body["error"], "Place does not exist");
    }

    let res = client.patch("/editplace/not-a-uuid", json!({ "cityName": "x" })).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = client.delete(&format!("/deleteplace/{}", missing)).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["error"], "Place does not exist");

    Ok(())
}

#[tokio::test]
async fn malformed_json_body_is_bad_request() -> Result<()> {
    let app = test_app(false);
    let mut client = TestClient::new(&app);

    let res = client.post("/addplace", json!("not an object")).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], "INVALID_JSON");

    Ok(())
}

#[tokio::test]
async fn ratings_accept_numeric_strings() -> Result<()> {
    let app = test_app(false);
    let mut client = TestClient::new(&app);

    let mut body = eiffel_tower();
    body["experienceRating"] = json!("4");
    let place = client.add_place(body).await?;
    assert_eq!(place["experienceRating"], 4);

    let mut body = eiffel_tower();
    body["expenseRating"] = json!("2.5");
    let place = client.add_place(body).await?;
    assert_eq!(place["expenseRating"], json!(2.5));

    let mut body = eiffel_tower();
    body["expenseRating"] = json!("pricey");
    let res = client.post("/addplace", body).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["field_errors"].get("expenseRating").is_some());

    Ok(())
}

#[tokio::test]
async fn client_cannot_set_owner_or_id() -> Result<()> {
    let app = test_app(false);
    let mut client = TestClient::new(&app);

    let mut body = eiffel_tower();
    body["_id"] = json!("forged");
    body["owner"] = json!("0b0f1d3c-8a2e-4c55-9a57-3c1f2b0e4d11");
    let place = client.add_place(body).await?;

    assert_ne!(place["_id"], "forged");
    assert!(place.get("owner").is_none());

    Ok(())
}

#[tokio::test]
async fn fractional_ratings_are_stored_and_returned() -> Result<()> {
    let app = test_app(false);
    let mut client = TestClient::new(&app);

    let mut body = eiffel_tower();
    body["experienceRating"] = json!(4.5);
    let place = client.add_place(body).await?;
    assert_eq!(place["experienceRating"], json!(4.5));
    assert_eq!(place["expenseRating"], json!(3));

    let id = place["_id"].as_str().expect("id");
    let res = client.get(&format!("/getplace/{}", id)).await?;
    assert_eq!(res.body["place"]["experienceRating"], json!(4.5));

    let res = client.patch(&format!("/editplace/{}", id), json!({ "expenseRating": 1.25 })).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["place"]["expenseRating"], json!(1.25));

    // Filters compare against whole numbers, so 4.5 never matches 4.
    let res = client.get("/getplaces?experienceRating=4").await?;
    assert_eq!(res.body["places"], json!([]));

    Ok(())
}
