use serde_json::json;

use crate::common::{TestApp, routes};

mod product_creation {
    use super::*;

    #[tokio::test]
    async fn create_prefixes_images_and_stores_attributes() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Shirts").await;
        let size = app.create_attribute("Size").await;
        let color = app.create_attribute("Color").await;

        let res = app
            .post(
                routes::PRODUCTS,
                &json!({
                    "title": "Linen Shirt",
                    "price": 49.9,
                    "description": "Breathable",
                    "category_id": category_id,
                    "images": ["front.png", "back.png"],
                    "attributes": [
                        {"attribute_id": size, "value": "L"},
                        {"id": color, "value": "white"}
                    ]
                }),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["title"], "Linen Shirt");
        assert_eq!(res.body["category_id"], category_id);
        assert_eq!(
            res.body["images"],
            json!(["/uploads/front.png", "/uploads/back.png"])
        );
        assert!(res.body.get("attributes").is_none());
        assert_eq!(app.attribute_row_count(res.id()).await, 2);
    }

    #[tokio::test]
    async fn duplicate_title_is_rejected() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Mugs").await;
        app.create_product("Mug", category_id, json!([])).await;

        let res = app
            .post(
                routes::PRODUCTS,
                &json!({
                    "title": "Mug",
                    "price": 1,
                    "description": "Different description",
                    "category_id": category_id,
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "DUPLICATE_TITLE");
    }

    #[tokio::test]
    async fn missing_category_creates_nothing() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::PRODUCTS,
                &json!({
                    "title": "Orphan",
                    "price": 3,
                    "description": "",
                    "category_id": 999,
                }),
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");

        let list = app.get(routes::PRODUCTS).await;
        assert_eq!(list.body.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn invalid_payloads_are_validation_errors() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Misc").await;

        let res = app
            .post(
                routes::PRODUCTS,
                &json!({
                    "title": "   ",
                    "price": 1,
                    "description": "",
                    "category_id": category_id,
                }),
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");

        let res = app
            .post(
                routes::PRODUCTS,
                &json!({
                    "title": "Negative",
                    "price": -5,
                    "description": "",
                    "category_id": category_id,
                }),
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");

        let res = app
            .post(routes::PRODUCTS, &json!({ "title": "No price" }))
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod product_update {
    use super::*;

    #[tokio::test]
    async fn successive_updates_keep_a_single_attribute_row() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Shoes").await;
        let size = app.create_attribute("Size").await;
        let id = app.create_product("Sneaker", category_id, json!([])).await;

        for value in ["41", "42"] {
            let res = app
                .patch(
                    &routes::product(id),
                    &json!({ "attributes": [{"attribute_id": size, "value": value}] }),
                )
                .await;
            assert_eq!(res.status, 200, "{}", res.text);
        }

        assert_eq!(app.attribute_row_count(id).await, 1);
        let detail = app.get(&routes::product(id)).await;
        assert_eq!(
            detail.body["attributes"],
            json!([{"attribute_id": size, "value": "42"}])
        );
    }

    #[tokio::test]
    async fn repeated_attribute_in_one_request_keeps_last_value() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Hats").await;
        let color = app.create_attribute("Color").await;

        let id = app
            .create_product(
                "Beanie",
                category_id,
                json!([
                    {"attribute_id": color, "value": "red"},
                    {"attribute_id": color, "value": "navy"}
                ]),
            )
            .await;

        assert_eq!(app.attribute_row_count(id).await, 1);
        let detail = app.get(&routes::product(id)).await;
        assert_eq!(detail.body["attributes"][0]["value"], "navy");
    }

    #[tokio::test]
    async fn empty_patch_leaves_product_unchanged() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Bags").await;
        let id = app.create_product("Tote", category_id, json!([])).await;
        let before = app.get(&routes::product(id)).await;

        let res = app.patch(&routes::product(id), &json!({})).await;

        assert_eq!(res.status, 200);
        for field in ["title", "price", "description", "category_id", "images"] {
            assert_eq!(res.body[field], before.body[field], "{field} changed");
        }
        assert_eq!(app.attribute_row_count(id).await, 0);
    }

    #[tokio::test]
    async fn patch_applies_present_fields_but_not_images() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Lamps").await;
        let other_category = app.create_category("Outlet").await;
        let res = app
            .post(
                routes::PRODUCTS,
                &json!({
                    "title": "Desk Lamp",
                    "price": 30,
                    "description": "Warm light",
                    "category_id": category_id,
                    "images": ["lamp.png"],
                }),
            )
            .await;
        let id = res.id();

        let res = app
            .patch(
                &routes::product(id),
                &json!({
                    "price": 0,
                    "category_id": other_category,
                    "images": ["replacement.png"],
                }),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["title"], "Desk Lamp");
        assert_eq!(res.body["price"], 0.0);
        assert_eq!(res.body["description"], "Warm light");
        assert_eq!(res.body["category_id"], other_category);
        assert_eq!(res.body["images"], json!(["/uploads/lamp.png"]));
    }

    #[tokio::test]
    async fn rename_to_existing_title_is_accepted() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Pens").await;
        app.create_product("Fountain Pen", category_id, json!([])).await;
        let id = app.create_product("Ballpoint", category_id, json!([])).await;

        let res = app
            .patch(&routes::product(id), &json!({ "title": "Fountain Pen" }))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["title"], "Fountain Pen");
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let app = TestApp::spawn().await;
        let res = app
            .patch(&routes::product(4242), &json!({ "title": "Ghost" }))
            .await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn unknown_category_is_not_found() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Cups").await;
        let id = app.create_product("Cup", category_id, json!([])).await;

        let res = app
            .patch(&routes::product(id), &json!({ "category_id": 999 }))
            .await;

        assert_eq!(res.status, 404);
        let detail = app.get(&routes::product(id)).await;
        assert_eq!(detail.body["category_id"], category_id);
    }
}

mod product_reads {
    use super::*;

    #[tokio::test]
    async fn nes_tabs_lists_newest_first_without_relations() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Toys").await;
        let p1 = app.create_product("P1", category_id, json!([])).await;
        let p2 = app.create_product("P2", category_id, json!([])).await;
        let p3 = app.create_product("P3", category_id, json!([])).await;

        let res = app.get(routes::NES_TABS).await;

        assert_eq!(res.status, 200);
        let ids: Vec<i64> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![p3 as i64, p2 as i64, p1 as i64]);
        assert!(res.body[0].get("category").is_none());
    }

    #[tokio::test]
    async fn list_includes_category_and_attributes() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Books").await;
        let format = app.create_attribute("Format").await;
        app.create_product(
            "Novel",
            category_id,
            json!([{"attribute_id": format, "value": "paperback"}]),
        )
        .await;
        app.create_product("Atlas", category_id, json!([])).await;

        let res = app.get(routes::PRODUCTS).await;

        assert_eq!(res.status, 200);
        let items = res.body.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["title"], "Novel");
        assert_eq!(items[0]["category"]["name"], "Books");
        assert_eq!(items[0]["attributes"][0]["value"], "paperback");
        assert_eq!(items[1]["attributes"], json!([]));
    }

    #[tokio::test]
    async fn get_missing_product_is_not_found() {
        let app = TestApp::spawn().await;
        let res = app.get(&routes::product(1)).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod product_deletion {
    use super::*;

    #[tokio::test]
    async fn delete_removes_product_and_attribute_rows() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Chairs").await;
        let legs = app.create_attribute("Legs").await;
        let id = app
            .create_product(
                "Stool",
                category_id,
                json!([{"attribute_id": legs, "value": "3"}]),
            )
            .await;

        let res = app.delete(&routes::product(id)).await;

        assert_eq!(res.status, 204);
        assert_eq!(app.get(&routes::product(id)).await.status, 404);
        assert_eq!(app.attribute_row_count(id).await, 0);
    }

    #[tokio::test]
    async fn delete_of_missing_product_is_a_no_op() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Tables").await;
        app.create_product("Desk", category_id, json!([])).await;

        let res = app.delete(&routes::product(777)).await;

        assert_eq!(res.status, 204);
        let list = app.get(routes::PRODUCTS).await;
        assert_eq!(list.body.as_array().unwrap().len(), 1);
    }
}

mod image_upload {
    use super::*;

    #[tokio::test]
    async fn returns_filenames_in_upload_order() {
        let app = TestApp::spawn().await;

        let res = app
            .upload_images(&[("a.png", b"\x89PNG a"), ("b.png", b"\x89PNG b")])
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body, json!(["a.png", "b.png"]));
    }

    #[tokio::test]
    async fn empty_upload_returns_empty_list() {
        let app = TestApp::spawn().await;

        let res = app.upload_images(&[]).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body, json!([]));
    }
}
